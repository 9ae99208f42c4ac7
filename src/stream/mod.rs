// src/stream/mod.rs
//! 200 Hz EMG stream reconstruction
//!
//! Four raw notification sources, firing in strict cyclic order 0→1→2→3→0…,
//! together carry one 8-channel 200 Hz signal. This module merges them into
//! a single time-ordered sample sequence, compensates for dropped frames
//! with zero-filled placeholders, and fans every sample out to per-channel
//! sliding windows and a downstream sink.

pub mod reconstructor;
pub mod window;
pub mod worker;

pub use reconstructor::{Reconstructor, ReconstructorConfig, StreamCounters, StreamStats, WindowView};
pub use window::SlidingWindow;
pub use worker::{FrameSender, StreamWorker};

use crate::protocol::characteristics::EMG_CHANNELS;

/// One sample of the reconstructed 200 Hz stream.
///
/// `synthesized` marks a zero-filled placeholder inserted for a frame that
/// never arrived; placeholders keep the stream wall-clock aligned over a
/// continuity-breaking gap instead of compressing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructedSample {
    /// Monotonic position in the reconstructed stream.
    pub sequence: u64,
    /// Signed 8-bit values for channels 0–7.
    pub channels: [i8; EMG_CHANNELS],
    /// Whether this sample is a gap-fill placeholder.
    pub synthesized: bool,
}

impl ReconstructedSample {
    /// A zero-valued placeholder at `sequence`.
    pub fn placeholder(sequence: u64) -> Self {
        Self {
            sequence,
            channels: [0; EMG_CHANNELS],
            synthesized: true,
        }
    }
}
