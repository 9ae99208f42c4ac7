// src/hal/loopback.rs
//! In-memory transport and sink doubles
//!
//! Record every call in order so session and controller behavior can be
//! asserted without hardware. Both can be switched into a failing state to
//! exercise error propagation.

use crate::error::{ProtocolError, ProtocolResult};
use crate::hal::traits::{SampleSink, Transport};
use crate::protocol::characteristics::SourceId;
use crate::protocol::command::CommandFrame;
use crate::stream::ReconstructedSample;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// A transport call observed by [`LoopbackTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    /// Command frame write, captured as encoded wire bytes.
    Write(Vec<u8>),
    /// Notification subscription.
    Subscribe(SourceId),
    /// Notification unsubscription.
    Unsubscribe(SourceId),
}

/// Transport double that records calls in arrival order.
#[derive(Debug, Default)]
pub struct LoopbackTransport {
    calls: Mutex<Vec<TransportCall>>,
    failing: AtomicBool,
}

impl LoopbackTransport {
    /// An empty, non-failing transport double.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    /// Calls observed so far, in order.
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().clone()
    }

    fn check(&self, operation: &str) -> ProtocolResult<()> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(ProtocolError::transport(operation, "loopback failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for LoopbackTransport {
    async fn write_command(&self, frame: &CommandFrame) -> ProtocolResult<()> {
        self.check("write_command")?;
        self.calls
            .lock()
            .push(TransportCall::Write(frame.to_bytes()));
        Ok(())
    }

    async fn subscribe(&self, source: SourceId) -> ProtocolResult<()> {
        self.check("subscribe")?;
        self.calls.lock().push(TransportCall::Subscribe(source));
        Ok(())
    }

    async fn unsubscribe(&self, source: SourceId) -> ProtocolResult<()> {
        self.check("unsubscribe")?;
        self.calls.lock().push(TransportCall::Unsubscribe(source));
        Ok(())
    }
}

/// Sink double that collects every sample it receives.
#[derive(Debug, Default)]
pub struct CollectingSink {
    samples: Mutex<Vec<ReconstructedSample>>,
    failing: AtomicBool,
}

impl CollectingSink {
    /// An empty, non-failing sink double.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delivery fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    /// Samples received so far, in delivery order.
    pub fn samples(&self) -> Vec<ReconstructedSample> {
        self.samples.lock().clone()
    }

    /// Number of samples received so far.
    pub fn len(&self) -> usize {
        self.samples.lock().len()
    }

    /// Whether no samples have been received yet.
    pub fn is_empty(&self) -> bool {
        self.samples.lock().is_empty()
    }
}

impl SampleSink for CollectingSink {
    fn on_sample(&self, sample: &ReconstructedSample) -> ProtocolResult<()> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(ProtocolError::transport("on_sample", "sink failure"));
        }
        self.samples.lock().push(*sample);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::command::VibrationDuration;

    #[tokio::test]
    async fn test_loopback_records_in_order() {
        let transport = LoopbackTransport::new();
        transport
            .write_command(&CommandFrame::vibrate(VibrationDuration::Short))
            .await
            .unwrap();
        transport.subscribe(SourceId::BATTERY).await.unwrap();
        transport.unsubscribe(SourceId::BATTERY).await.unwrap();

        assert_eq!(
            transport.calls(),
            vec![
                TransportCall::Write(vec![0x03, 0x01, 0x01]),
                TransportCall::Subscribe(SourceId::BATTERY),
                TransportCall::Unsubscribe(SourceId::BATTERY),
            ]
        );
    }

    #[tokio::test]
    async fn test_loopback_failure() {
        let transport = LoopbackTransport::new();
        transport.set_failing(true);
        let err = transport.subscribe(SourceId::IMU).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::ProtocolError::TransportFailure { .. }
        ));
        assert!(transport.calls().is_empty());
    }
}
