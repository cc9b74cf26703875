//! Per-sequence bookkeeping for a running upload
//!
//! A session lives exactly as long as one upload sequence. It owns the
//! running byte counter and the start time every progress and ETA figure is
//! derived from.

use std::time::Duration;

use tokio::time::Instant;

/// ETA is not shown until the sequence has been running this long
pub const ETA_WARMUP: Duration = Duration::from_secs(1);

/// Highest percentage shown while bytes are still in flight
pub const IN_FLIGHT_PERCENT_CAP: u8 = 99;

#[derive(Debug, Clone)]
pub struct UploadSession {
    total_bytes: u64,
    uploaded_bytes: u64,
    started_at: Instant,
}

impl UploadSession {
    /// Starts the clock for a sequence of `total_bytes`
    pub fn start(total_bytes: u64) -> Self {
        UploadSession {
            total_bytes,
            uploaded_bytes: 0,
            started_at: Instant::now(),
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Bytes of files that finished uploading
    pub fn uploaded_bytes(&self) -> u64 {
        self.uploaded_bytes
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Records a finished file by its declared size, not by observed bytes
    pub fn advance(&mut self, file_size: u64) {
        self.uploaded_bytes = self
            .uploaded_bytes
            .saturating_add(file_size)
            .min(self.total_bytes);
    }

    /// Finished bytes plus `sent` bytes of the current file, capped at the total
    pub fn confirmed_bytes(&self, sent: u64) -> u64 {
        self.uploaded_bytes.saturating_add(sent).min(self.total_bytes)
    }

    /// `round(confirmed / total * 100)`, 0 for an empty sequence
    pub fn percent(&self, sent: u64) -> u8 {
        if self.total_bytes == 0 {
            return 0;
        }
        let ratio = self.confirmed_bytes(sent) as f64 / self.total_bytes as f64;
        (ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Percentage for a progress tick; 100 is reserved for a finished sequence
    pub fn in_flight_percent(&self, sent: u64) -> u8 {
        self.percent(sent).min(IN_FLIGHT_PERCENT_CAP)
    }

    /// Seconds left at the average speed since the sequence started.
    ///
    /// Returns `None` during the warmup second and while nothing has been
    /// sent yet.
    pub fn eta_secs(&self, sent: u64, elapsed: Duration) -> Option<f64> {
        if elapsed <= ETA_WARMUP {
            return None;
        }
        let confirmed = self.confirmed_bytes(sent);
        let speed = confirmed as f64 / elapsed.as_secs_f64();
        if speed <= 0.0 {
            return None;
        }
        let remaining = self.total_bytes.saturating_sub(confirmed);
        Some(remaining as f64 / speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_advance_accumulates_exact_sizes() {
        let mut session = UploadSession::start(30);
        session.advance(10);
        assert_eq!(session.uploaded_bytes(), 10);
        session.advance(20);
        assert_eq!(session.uploaded_bytes(), 30);
    }

    #[tokio::test]
    async fn test_advance_never_exceeds_total() {
        let mut session = UploadSession::start(10);
        session.advance(8);
        session.advance(8);
        assert_eq!(session.uploaded_bytes(), 10);
    }

    #[tokio::test]
    async fn test_percent_rounds() {
        let mut session = UploadSession::start(200);
        session.advance(100);
        assert_eq!(session.percent(0), 50);
        assert_eq!(session.percent(1), 51); // 50.5 rounds up
        assert_eq!(session.percent(100), 100);
    }

    #[tokio::test]
    async fn test_in_flight_percent_is_capped() {
        let session = UploadSession::start(1000);
        assert_eq!(session.percent(996), 100);
        assert_eq!(session.in_flight_percent(996), 99);
        assert_eq!(session.in_flight_percent(1000), 99);
        assert_eq!(session.in_flight_percent(500), 50);
    }

    #[tokio::test]
    async fn test_percent_with_zero_total() {
        let session = UploadSession::start(0);
        assert_eq!(session.percent(0), 0);
        assert_eq!(session.in_flight_percent(0), 0);
    }

    #[tokio::test]
    async fn test_eta_waits_for_warmup() {
        let session = UploadSession::start(1000);
        assert_eq!(session.eta_secs(500, Duration::from_millis(500)), None);
        assert_eq!(session.eta_secs(500, Duration::from_secs(1)), None);
    }

    #[tokio::test]
    async fn test_eta_uses_average_speed_since_start() {
        let mut session = UploadSession::start(1000);
        session.advance(200);
        // 400 bytes in 2s -> 200 B/s, 600 left -> 3s
        let eta = session.eta_secs(200, Duration::from_secs(2)).unwrap();
        assert!((eta - 3.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_eta_none_without_progress() {
        let session = UploadSession::start(1000);
        assert_eq!(session.eta_secs(0, Duration::from_secs(5)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_follows_runtime_clock() {
        let session = UploadSession::start(1);
        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(session.elapsed() >= Duration::from_secs(3));
    }
}
