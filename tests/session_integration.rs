// tests/session_integration.rs
//! Session controller against an in-memory transport
//!
//! Verifies that mode changes reach the transport as the right command
//! bytes followed by the right subscription calls, and that pipe-style
//! usage (controller + dispatcher + worker) fits together.

use myo_core::hal::{CollectingSink, LoopbackTransport, TransportCall};
use myo_core::protocol::command::VibrationDuration;
use myo_core::session::{ClassifierMode, EmgMode, ImuMode, SessionController};
use myo_core::stream::{Reconstructor, ReconstructorConfig, StreamWorker};
use myo_core::{Dispatcher, Event, SourceId};
use std::sync::Arc;

/// Full stream-on sequence: EMG raw, IMU data, classifier on. Every
/// command precedes its own subscriptions, in request order.
#[tokio::test]
async fn test_stream_on_call_order() {
    let transport = Arc::new(LoopbackTransport::new());
    let mut controller = SessionController::new(transport.clone());

    controller.set_emg_mode(EmgMode::Raw).await.unwrap();
    controller.set_imu_mode(ImuMode::SendData).await.unwrap();
    controller
        .set_classifier_mode(ClassifierMode::Enabled)
        .await
        .unwrap();

    let calls = transport.calls();
    let expected = vec![
        TransportCall::Write(vec![0x01, 0x03, 0x03, 0x00, 0x00]),
        TransportCall::Subscribe(SourceId::RAW_EMG[0]),
        TransportCall::Subscribe(SourceId::RAW_EMG[1]),
        TransportCall::Subscribe(SourceId::RAW_EMG[2]),
        TransportCall::Subscribe(SourceId::RAW_EMG[3]),
        TransportCall::Write(vec![0x01, 0x03, 0x03, 0x01, 0x00]),
        TransportCall::Subscribe(SourceId::IMU),
        TransportCall::Write(vec![0x01, 0x03, 0x03, 0x01, 0x01]),
        TransportCall::Subscribe(SourceId::CLASSIFIER),
    ];
    assert_eq!(calls, expected);
}

/// stop_all turns everything off and unsubscribes each active source.
#[tokio::test]
async fn test_stop_all_unsubscribes_active_sources() {
    let transport = Arc::new(LoopbackTransport::new());
    let mut controller = SessionController::new(transport.clone());
    controller.set_emg_mode(EmgMode::Filtered50Hz).await.unwrap();
    controller.set_imu_mode(ImuMode::SendAll).await.unwrap();

    let before = transport.calls().len();
    controller.stop_all().await.unwrap();

    let calls = transport.calls()[before..].to_vec();
    let expected = vec![
        TransportCall::Write(vec![0x01, 0x03, 0x00, 0x03, 0x00]),
        TransportCall::Unsubscribe(SourceId::FILTERED_50HZ),
        TransportCall::Write(vec![0x01, 0x03, 0x00, 0x00, 0x00]),
        TransportCall::Unsubscribe(SourceId::IMU),
        // classifier was never enabled, so no unsubscribe follows
        TransportCall::Write(vec![0x01, 0x03, 0x00, 0x00, 0x00]),
    ];
    assert_eq!(calls, expected);
}

/// A transport failure mid-transition surfaces to the caller.
#[tokio::test]
async fn test_transport_failure_surfaces() {
    let transport = Arc::new(LoopbackTransport::new());
    let mut controller = SessionController::new(transport.clone());

    transport.set_failing(true);
    assert!(controller.set_emg_mode(EmgMode::Raw).await.is_err());

    transport.set_failing(false);
    assert!(controller.vibrate(VibrationDuration::Short).await.is_ok());
}

/// Notification payloads flow dispatcher -> worker -> sink without the
/// transport callback ever blocking.
#[tokio::test]
async fn test_notification_pipeline() {
    let dispatcher = Dispatcher::new();
    let sink = Arc::new(CollectingSink::new());
    let worker = StreamWorker::spawn(Reconstructor::new(
        ReconstructorConfig::default(),
        sink.clone(),
    ));
    let sender = worker.sender();

    // Simulated notification arrivals: sources 0,1,3 (source 2 dropped)
    for source in [SourceId::RAW_EMG[0], SourceId::RAW_EMG[1], SourceId::RAW_EMG[3]] {
        let payload = [3i8 as u8; 16];
        match dispatcher.decode(source, &payload).unwrap() {
            Event::RawEmg(frame) => assert!(sender.send(frame)),
            other => panic!("expected raw emg event, got {:?}", other),
        }
    }

    let recon = worker.shutdown().await;
    let stats = recon.counters().snapshot();
    assert_eq!(stats.frames, 3);
    assert_eq!(stats.real_samples, 6);
    assert_eq!(stats.synthesized_samples, 1);
    assert_eq!(sink.len(), 7);
}
