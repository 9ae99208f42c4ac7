// src/stream/reconstructor.rs
//! Cyclic-source gap detection and sample emission
//!
//! The device cannot be asked to resend; the only recoverable signal is
//! *which* of the four cyclic sources was skipped, inferred purely from
//! notification arrival order. The reconstructor trades perfect fidelity
//! for temporal alignment: each missing cyclic step becomes one zero-filled
//! placeholder so downstream timing stays intact. Gaps are a first-class,
//! silently compensated condition — never an error.

use crate::hal::traits::SampleSink;
use crate::protocol::characteristics::EMG_CHANNELS;
use crate::protocol::types::RawEmgFrame;
use crate::stream::window::{SlidingWindow, DEFAULT_WINDOW_CAPACITY};
use crate::stream::ReconstructedSample;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Number of cyclic raw EMG sources.
const SOURCE_CYCLE: u8 = 4;

/// Reconstructor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructorConfig {
    /// Per-channel sliding window capacity in samples.
    #[serde(default = "defaults::window_capacity")]
    pub window_capacity: usize,
}

mod defaults {
    pub fn window_capacity() -> usize {
        super::DEFAULT_WINDOW_CAPACITY
    }
}

impl Default for ReconstructorConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
        }
    }
}

/// Monitored stream counters, shared with observers via `Arc`.
#[derive(Debug, Default)]
pub struct StreamCounters {
    frames: AtomicU64,
    real_samples: AtomicU64,
    synthesized_samples: AtomicU64,
    sink_failures: AtomicU64,
}

impl StreamCounters {
    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> StreamStats {
        StreamStats {
            frames: self.frames.load(Ordering::Relaxed),
            real_samples: self.real_samples.load(Ordering::Relaxed),
            synthesized_samples: self.synthesized_samples.load(Ordering::Relaxed),
            sink_failures: self.sink_failures.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.frames.store(0, Ordering::Relaxed);
        self.real_samples.store(0, Ordering::Relaxed);
        self.synthesized_samples.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time stream statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamStats {
    /// Raw frames applied.
    pub frames: u64,
    /// Samples decoded from received frames.
    pub real_samples: u64,
    /// Zero-filled placeholders inserted for missing frames.
    pub synthesized_samples: u64,
    /// Sink deliveries that reported failure.
    pub sink_failures: u64,
}

/// Read-only view over the reconstructor's per-channel windows.
#[derive(Debug, Clone)]
pub struct WindowView {
    windows: Arc<RwLock<Vec<SlidingWindow>>>,
}

impl WindowView {
    /// Number of channels (always 8 for this device).
    pub fn channel_count(&self) -> usize {
        self.windows.read().len()
    }

    /// Copy of one channel's retained `(sequence, value)` pairs in
    /// arrival order, or `None` for an out-of-range channel.
    pub fn channel_snapshot(&self, channel: usize) -> Option<Vec<(u64, i8)>> {
        self.windows.read().get(channel).map(SlidingWindow::snapshot)
    }

    /// Retained sample count on one channel.
    pub fn channel_len(&self, channel: usize) -> Option<usize> {
        self.windows.read().get(channel).map(SlidingWindow::len)
    }
}

/// Single-writer EMG stream reconstructor.
///
/// Exactly one logical sequence of frame-arrival events may call
/// [`apply`](Reconstructor::apply); run it behind
/// [`StreamWorker`](crate::stream::StreamWorker) when frames arrive from an
/// async transport. Decoding stays elsewhere — this type only sequences,
/// gap-fills, windows, and forwards.
pub struct Reconstructor {
    config: ReconstructorConfig,
    last_source: Option<u8>,
    sequence: u64,
    windows: Arc<RwLock<Vec<SlidingWindow>>>,
    sink: Arc<dyn SampleSink>,
    counters: Arc<StreamCounters>,
}

impl Reconstructor {
    /// Create a reconstructor forwarding to `sink`.
    pub fn new(config: ReconstructorConfig, sink: Arc<dyn SampleSink>) -> Self {
        let windows = (0..EMG_CHANNELS)
            .map(|_| SlidingWindow::new(config.window_capacity))
            .collect();

        Self {
            config,
            last_source: None,
            sequence: 0,
            windows: Arc::new(RwLock::new(windows)),
            sink,
            counters: Arc::new(StreamCounters::default()),
        }
    }

    /// Shared read-only view of the per-channel windows.
    pub fn window_view(&self) -> WindowView {
        WindowView {
            windows: Arc::clone(&self.windows),
        }
    }

    /// Shared handle to the monitored counters.
    pub fn counters(&self) -> Arc<StreamCounters> {
        Arc::clone(&self.counters)
    }

    /// Current configuration.
    pub fn config(&self) -> &ReconstructorConfig {
        &self.config
    }

    /// Next sequence index the stream will assign.
    pub fn next_sequence(&self) -> u64 {
        self.sequence
    }

    /// Apply one raw frame in arrival order.
    ///
    /// Synthesizes one placeholder per missing cyclic step, then emits the
    /// frame's two real sub-frame samples. Every emitted sample lands in
    /// the windows and the sink.
    pub fn apply(&mut self, frame: RawEmgFrame) {
        debug_assert!(frame.source < SOURCE_CYCLE, "source id out of cycle");
        self.counters.frames.fetch_add(1, Ordering::Relaxed);

        let progression = match self.last_source {
            None => 1,
            Some(last) => {
                let step = (SOURCE_CYCLE + frame.source - last) % SOURCE_CYCLE;
                // The same source twice in a row means a whole cycle was lost
                if step == 0 {
                    SOURCE_CYCLE
                } else {
                    step
                }
            }
        };

        for _ in 1..progression {
            let sample = ReconstructedSample::placeholder(self.sequence);
            self.sequence += 1;
            self.counters
                .synthesized_samples
                .fetch_add(1, Ordering::Relaxed);
            self.emit(sample);
        }

        for channels in frame.sub_frames() {
            let sample = ReconstructedSample {
                sequence: self.sequence,
                channels,
                synthesized: false,
            };
            self.sequence += 1;
            self.counters.real_samples.fetch_add(1, Ordering::Relaxed);
            self.emit(sample);
        }

        self.last_source = Some(frame.source);
    }

    /// Clear windows, counters, and sequencing state. Used when streaming
    /// stops or the session ends.
    pub fn reset(&mut self) {
        self.last_source = None;
        self.sequence = 0;
        self.counters.reset();
        for window in self.windows.write().iter_mut() {
            window.clear();
        }
    }

    fn emit(&self, sample: ReconstructedSample) {
        {
            let mut windows = self.windows.write();
            for (channel, window) in windows.iter_mut().enumerate() {
                window.push(sample.sequence, sample.channels[channel]);
            }
        }

        // Fire and forget: failures are counted and logged, never retried,
        // and never block reconstruction.
        if let Err(err) = self.sink.on_sample(&sample) {
            self.counters.sink_failures.fetch_add(1, Ordering::Relaxed);
            warn!(sequence = sample.sequence, %err, "sink rejected sample");
        }
    }
}
