// src/stream/worker.rs
//! Async front for the single-writer reconstructor
//!
//! Transport notification callbacks must never block, so frames are handed
//! to an unbounded channel and drained by one dedicated task that owns the
//! [`Reconstructor`]. The channel is the serialization point: arrival order
//! on the sender is processing order in the reconstructor.

use crate::protocol::types::RawEmgFrame;
use crate::stream::reconstructor::Reconstructor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Cloneable, non-blocking producer handle.
#[derive(Clone)]
pub struct FrameSender {
    tx: mpsc::UnboundedSender<RawEmgFrame>,
    depth: Arc<AtomicUsize>,
}

impl FrameSender {
    /// Enqueue a frame for reconstruction.
    ///
    /// Returns `false` if the worker has shut down; the frame is dropped in
    /// that case. Never blocks.
    pub fn send(&self, frame: RawEmgFrame) -> bool {
        if self.tx.send(frame).is_ok() {
            self.depth.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    /// Frames enqueued but not yet applied.
    pub fn queue_depth(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }
}

/// Owns the reconstructor task.
pub struct StreamWorker {
    handle: JoinHandle<Reconstructor>,
    tx: mpsc::UnboundedSender<RawEmgFrame>,
    depth: Arc<AtomicUsize>,
}

impl StreamWorker {
    /// Spawn the drain task on the current tokio runtime.
    pub fn spawn(mut reconstructor: Reconstructor) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<RawEmgFrame>();
        let depth = Arc::new(AtomicUsize::new(0));
        let task_depth = Arc::clone(&depth);

        let handle = tokio::spawn(async move {
            while let Some(frame) = rx.recv().await {
                reconstructor.apply(frame);
                task_depth.fetch_sub(1, Ordering::Relaxed);
            }
            debug!(
                applied = reconstructor.counters().snapshot().frames,
                "stream worker drained"
            );
            reconstructor
        });

        Self { handle, tx, depth }
    }

    /// Producer handle for transport callbacks.
    pub fn sender(&self) -> FrameSender {
        FrameSender {
            tx: self.tx.clone(),
            depth: Arc::clone(&self.depth),
        }
    }

    /// Close the channel, drain in-flight frames, and hand the
    /// reconstructor back for inspection or reuse.
    pub async fn shutdown(self) -> Reconstructor {
        drop(self.tx);
        match self.handle.await {
            Ok(reconstructor) => reconstructor,
            Err(err) => {
                // Drain task neither panics nor gets cancelled in normal
                // operation; if it did, the state is unrecoverable anyway.
                panic!("stream worker task failed: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::loopback::CollectingSink;
    use crate::stream::reconstructor::ReconstructorConfig;

    fn frame(source: u8, fill: i8) -> RawEmgFrame {
        RawEmgFrame {
            source,
            samples: [fill; 16],
        }
    }

    #[tokio::test]
    async fn test_worker_matches_direct_application() {
        let direct_sink = Arc::new(CollectingSink::new());
        let mut direct =
            Reconstructor::new(ReconstructorConfig::default(), direct_sink.clone());

        let worker_sink = Arc::new(CollectingSink::new());
        let worker = StreamWorker::spawn(Reconstructor::new(
            ReconstructorConfig::default(),
            worker_sink.clone(),
        ));
        let sender = worker.sender();

        let sources = [0u8, 1, 3, 0, 0, 2, 3];
        for (i, &source) in sources.iter().enumerate() {
            let f = frame(source, i as i8);
            direct.apply(f);
            assert!(sender.send(f));
        }

        let drained = worker.shutdown().await;
        assert_eq!(worker_sink.samples(), direct_sink.samples());
        assert_eq!(
            drained.counters().snapshot(),
            direct.counters().snapshot()
        );
        assert_eq!(sender.queue_depth(), 0);
    }

    #[tokio::test]
    async fn test_send_after_shutdown_reports_closed() {
        let worker = StreamWorker::spawn(Reconstructor::new(
            ReconstructorConfig::default(),
            Arc::new(CollectingSink::new()),
        ));
        let sender = worker.sender();
        worker.shutdown().await;
        assert!(!sender.send(frame(0, 1)));
    }

    #[tokio::test]
    async fn test_shutdown_drains_pending_frames() {
        let sink = Arc::new(CollectingSink::new());
        let worker = StreamWorker::spawn(Reconstructor::new(
            ReconstructorConfig::default(),
            sink.clone(),
        ));
        let sender = worker.sender();

        for i in 0..100u8 {
            sender.send(frame(i % 4, i as i8));
        }
        worker.shutdown().await;

        // 100 gapless frames, two samples each
        assert_eq!(sink.len(), 200);
    }
}
