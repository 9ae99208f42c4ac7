// src/hal/traits.rs
//! Capability traits consumed by the protocol core
//!
//! The core owns no I/O. The BLE stack implements [`Transport`]; whatever
//! stores or forwards reconstructed samples implements [`SampleSink`].

use crate::error::ProtocolResult;
use crate::protocol::characteristics::SourceId;
use crate::protocol::command::CommandFrame;
use crate::stream::ReconstructedSample;
use async_trait::async_trait;

/// Wireless transport capability.
///
/// Connection lifecycle, service discovery, and retry policy all belong to
/// the implementor; the core calls these primitives and propagates their
/// failures opaquely as
/// [`TransportFailure`](crate::error::ProtocolError::TransportFailure).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Write an encoded command frame to the command characteristic.
    async fn write_command(&self, frame: &CommandFrame) -> ProtocolResult<()>;

    /// Start notifications from `source`.
    async fn subscribe(&self, source: SourceId) -> ProtocolResult<()>;

    /// Stop notifications from `source`.
    async fn unsubscribe(&self, source: SourceId) -> ProtocolResult<()>;
}

/// Downstream consumer of reconstructed EMG samples.
///
/// Best-effort: a failure is reported to the caller but never retried, and
/// implementations must not block — a slow sink drops or buffers on its own.
pub trait SampleSink: Send + Sync {
    /// Receive one reconstructed sample.
    fn on_sample(&self, sample: &ReconstructedSample) -> ProtocolResult<()>;
}

/// Sink that discards every sample. Useful when only the sliding windows
/// are of interest.
#[derive(Debug, Default)]
pub struct NullSink;

impl SampleSink for NullSink {
    fn on_sample(&self, _sample: &ReconstructedSample) -> ProtocolResult<()> {
        Ok(())
    }
}
