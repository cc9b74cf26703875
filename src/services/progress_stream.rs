//! Request body wrapper reporting how many bytes were handed to the connection

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use tokio::sync::mpsc::Sender;

use crate::model::progress_tick::ProgressTick;

struct ProgressTracker {
    bytes_sent: u64,
    content_length: Option<u64>,
    progress_sender: Sender<ProgressTick>,
}

impl ProgressTracker {
    fn track(&mut self, len: u64) {
        self.bytes_sent += len;
        let tick = ProgressTick {
            bytes_sent: self.bytes_sent,
            bytes_total: self.content_length,
        };
        // Ticks are cumulative, dropping one when the channel is full loses nothing
        let _ = self.progress_sender.try_send(tick);
    }
}

/// Stream of body chunks that emits a [`ProgressTick`] per chunk polled
#[pin_project::pin_project]
pub struct ProgressStream<InnerStream> {
    #[pin]
    inner: InnerStream,
    tracker: ProgressTracker,
}

impl<InnerStream> ProgressStream<InnerStream> {
    pub fn new(
        inner: InnerStream,
        content_length: Option<u64>,
        tx: Sender<ProgressTick>,
    ) -> Self {
        Self {
            inner,
            tracker: ProgressTracker {
                bytes_sent: 0,
                content_length,
                progress_sender: tx,
            },
        }
    }
}

impl<InnerStream, E> Stream for ProgressStream<InnerStream>
where
    InnerStream: Stream<Item = Result<Bytes, E>>,
{
    type Item = Result<Bytes, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        match this.inner.poll_next(cx) {
            Poll::Ready(Some(Ok(data))) => {
                this.tracker.track(data.len() as u64);
                Poll::Ready(Some(Ok(data)))
            }
            Poll::Ready(None) => {
                tracing::debug!(bytes = this.tracker.bytes_sent, "body done");
                Poll::Ready(None)
            }
            other => other,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
