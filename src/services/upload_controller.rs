//! Upload controller
//!
//! Drives one upload sequence at a time:
//! - asks the server for room before sending anything
//! - sends files strictly one after another, in selection order
//! - keeps the view-model in step with transport progress and the ETA
//! - stops at the first failed file, without touching files already stored
//!
//! It also guards remote deletion behind a confirmation.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::model::progress_tick::ProgressTick;
use crate::model::selected_file::{SelectedFile, SelectedFileSet};
use crate::model::upload_phase::UploadPhase;
use crate::model::upload_session::UploadSession;
use crate::model::view_state::{file_label, UploadViewState};
use crate::services::upload_view::UploadView;
use crate::services::vault_client::VaultApi;
use crate::utils::format_time;

/// Pause between a finished sequence and the reload
pub const DEFAULT_RELOAD_DELAY: Duration = Duration::from_millis(500);

const PROGRESS_CHANNEL_CAPACITY: usize = 64;

pub const STORAGE_FULL_MESSAGE: &str = "Upload failed - Storage full";
pub const NETWORK_ERROR_MESSAGE: &str = "Upload failed - Network error";
pub const DELETE_FAILED_MESSAGE: &str = "Delete failed";

/// How an [`UploadController::initiate`] call ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Every file was stored
    Completed { files: usize, bytes: u64 },
    /// The server has no room, or could not be asked
    CapacityDenied,
    /// File `index` (one-based) was refused; later files were not sent
    Failed { index: usize, name: String },
    /// Nothing selected, or a sequence is already running
    Rejected,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Completed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed,
    /// The user said no, nothing was sent
    Declined,
}

pub struct UploadController<C, V> {
    client: C,
    view: V,
    state: UploadViewState,
    phase: UploadPhase,
    reload_delay: Duration,
}

impl<C, V> UploadController<C, V>
where
    C: VaultApi,
    V: UploadView,
{
    pub fn new(client: C, view: V) -> Self {
        UploadController {
            client,
            view,
            state: UploadViewState::default(),
            phase: UploadPhase::Idle,
            reload_delay: DEFAULT_RELOAD_DELAY,
        }
    }

    pub fn with_reload_delay(mut self, reload_delay: Duration) -> Self {
        self.reload_delay = reload_delay;
        self
    }

    pub fn state(&self) -> &UploadViewState {
        &self.state
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_parts(self) -> (C, V) {
        (self.client, self.view)
    }

    fn set_phase(&mut self, phase: UploadPhase) {
        tracing::debug!(from = %self.phase, to = %phase, "upload phase");
        self.phase = phase;
    }

    fn render(&mut self) {
        self.view.render(&self.state);
    }

    fn alert(&mut self, message: &str) {
        tracing::warn!("{}", message);
        self.view.alert(message);
    }

    /// Uploads `files` into `destination` on the server, one file at a time
    pub async fn initiate(&mut self, files: SelectedFileSet, destination: &str) -> UploadOutcome {
        if files.is_empty() || !self.state.input_enabled || self.phase.is_busy() {
            tracing::warn!(files = files.len(), phase = %self.phase, "upload request ignored");
            return UploadOutcome::Rejected;
        }

        let total = files.total_size();
        self.state.selection = files.clone();
        self.set_phase(UploadPhase::Checking);

        if !self.storage_available(total).await {
            self.alert(STORAGE_FULL_MESSAGE);
            self.state.clear_selection();
            self.set_phase(UploadPhase::Idle);
            self.render();
            return UploadOutcome::CapacityDenied;
        }

        let mut session = UploadSession::start(total);
        self.state.progress_visible = true;
        self.state.input_enabled = false;
        self.render();

        let count = files.len();
        for (i, file) in files.files().iter().enumerate() {
            self.set_phase(UploadPhase::Uploading {
                index: i + 1,
                count,
            });

            if !self.upload_single(file, destination, &session, i + 1, count).await {
                tracing::error!(
                    name = %file.name,
                    uploaded = session.uploaded_bytes(),
                    reason = self.phase.error().unwrap_or_default(),
                    "upload sequence stopped"
                );
                self.reset();
                return UploadOutcome::Failed {
                    index: i + 1,
                    name: file.name.clone(),
                };
            }
            session.advance(file.size);
            tracing::info!(
                name = %file.name,
                uploaded = session.uploaded_bytes(),
                total,
                "file uploaded"
            );
        }

        self.state.mark_complete();
        self.set_phase(UploadPhase::Complete);
        self.render();

        tokio::time::sleep(self.reload_delay).await;
        self.view.reload();
        // a reload starts from a fresh page
        self.state = UploadViewState::default();
        self.set_phase(UploadPhase::Idle);

        UploadOutcome::Completed {
            files: count,
            bytes: total,
        }
    }

    async fn storage_available(&self, total: u64) -> bool {
        match self.client.check_storage(total).await {
            Ok(check) => {
                tracing::info!(total, free = check.free, available = check.available, "storage check");
                check.available
            }
            Err(e) => {
                tracing::warn!("storage check failed, treating as full: {}", e);
                false
            }
        }
    }

    /// Sends a single file and reports whether the server accepted it.
    ///
    /// Failures are alerted here; the caller only needs the verdict.
    pub async fn upload_single(
        &mut self,
        file: &SelectedFile,
        destination: &str,
        session: &UploadSession,
        index: usize,
        count: usize,
    ) -> bool {
        let (tx, mut rx) = mpsc::channel(PROGRESS_CHANNEL_CAPACITY);
        let client = &self.client;
        let state = &mut self.state;
        let view = &mut self.view;

        let result = {
            let transfer = client.upload(file, destination, tx);
            tokio::pin!(transfer);
            loop {
                tokio::select! {
                    biased;
                    result = &mut transfer => break result,
                    Some(tick) = rx.recv() => {
                        Self::apply_tick(state, view, session, file, index, count, tick);
                    }
                }
            }
        };
        while let Ok(tick) = rx.try_recv() {
            Self::apply_tick(state, view, session, file, index, count, tick);
        }

        let message = match result {
            Ok(reply) if reply.is_success() => return true,
            Ok(reply) => match reply.error_message() {
                Some(error) => format!("Upload failed ({}): {}", reply.status, error),
                None => format!("Upload failed ({})", reply.status),
            },
            Err(e) if e.is_transport() => {
                tracing::error!(name = %file.name, "upload transport error: {}", e);
                NETWORK_ERROR_MESSAGE.to_string()
            }
            Err(e) => format!("Upload failed - {}", e),
        };
        self.alert(&message);
        self.set_phase(UploadPhase::Failed(message));
        false
    }

    fn apply_tick(
        state: &mut UploadViewState,
        view: &mut V,
        session: &UploadSession,
        file: &SelectedFile,
        index: usize,
        count: usize,
        tick: ProgressTick,
    ) {
        if !tick.is_length_computable() {
            return;
        }
        let sent = tick.bytes_sent.min(file.size);
        state.percent = session.in_flight_percent(sent);
        state.label = file_label(&file.name, index, count);
        if let Some(eta) = session.eta_secs(sent, session.elapsed()) {
            state.time_left = format!("{} left", format_time(eta));
        }
        view.render(state);
    }

    /// Deletes a remote file after the user confirms, then reloads
    pub async fn delete_file(&mut self, path: &str, display_name: &str) -> DeleteOutcome {
        let prompt = format!("Delete \"{}\"?", display_name);
        if !self.view.confirm(&prompt).await {
            tracing::info!(path, "delete declined");
            return DeleteOutcome::Declined;
        }

        let outcome = match self.client.delete(path).await {
            Ok(reply) if reply.success => {
                tracing::info!(path, "deleted");
                DeleteOutcome::Deleted
            }
            Ok(reply) => {
                let message = match reply.error {
                    Some(error) if !error.is_empty() => format!("{}: {}", DELETE_FAILED_MESSAGE, error),
                    _ => DELETE_FAILED_MESSAGE.to_string(),
                };
                self.alert(&message);
                DeleteOutcome::Failed
            }
            Err(e) => {
                tracing::error!(path, "delete request failed: {}", e);
                self.alert(DELETE_FAILED_MESSAGE);
                DeleteOutcome::Failed
            }
        };
        self.view.reload();
        outcome
    }

    /// Clears every trace of an upload from the view
    pub fn reset(&mut self) {
        self.state.reset();
        self.set_phase(UploadPhase::Idle);
        self.render();
    }
}
