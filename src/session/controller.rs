// src/session/controller.rs
//! Drives mode transitions over a transport
//!
//! [`Session`] computes transitions as data; the controller is the thin
//! async layer that actually writes the command frame and applies the
//! subscription actions, in that order. Ordering matters on real hardware:
//! the firmware accepts a `set modes` command before the corresponding
//! notify subscription exists, but samples delivered to an unsubscribed
//! endpoint are lost.

use crate::error::ProtocolResult;
use crate::hal::traits::Transport;
use crate::protocol::command::{
    CommandFrame, SleepMode, UnlockKind, UserActionKind, VibrationDuration,
};
use crate::session::{
    ClassifierMode, EmgMode, ImuMode, ModeConfiguration, ModeTransition, Session,
    SubscriptionAction,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Applies session mode transitions to a transport.
pub struct SessionController {
    transport: Arc<dyn Transport>,
    session: Session,
}

impl SessionController {
    /// Wrap a transport with a fresh all-off session.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            session: Session::new(),
        }
    }

    /// Wrap a transport resuming from a known device configuration.
    pub fn with_configuration(transport: Arc<dyn Transport>, config: ModeConfiguration) -> Self {
        Self {
            transport,
            session: Session::with_configuration(config),
        }
    }

    /// The mode triple as last commanded.
    pub fn configuration(&self) -> ModeConfiguration {
        self.session.configuration()
    }

    /// Switch the EMG stream mode.
    pub async fn set_emg_mode(&mut self, mode: EmgMode) -> ProtocolResult<()> {
        info!(?mode, "setting emg mode");
        let transition = self.session.request_emg_mode(mode);
        self.apply(transition).await
    }

    /// Switch the IMU stream mode.
    pub async fn set_imu_mode(&mut self, mode: ImuMode) -> ProtocolResult<()> {
        info!(?mode, "setting imu mode");
        let transition = self.session.request_imu_mode(mode);
        self.apply(transition).await
    }

    /// Enable or disable classifier indications.
    pub async fn set_classifier_mode(&mut self, mode: ClassifierMode) -> ProtocolResult<()> {
        info!(?mode, "setting classifier mode");
        let transition = self.session.request_classifier_mode(mode);
        self.apply(transition).await
    }

    /// Turn every stream off. Used before disconnect so the device stops
    /// transmitting promptly instead of waiting for the link timeout.
    pub async fn stop_all(&mut self) -> ProtocolResult<()> {
        self.set_emg_mode(EmgMode::Off).await?;
        self.set_imu_mode(ImuMode::Off).await?;
        self.set_classifier_mode(ClassifierMode::Disabled).await
    }

    /// Trigger a built-in vibration pattern.
    pub async fn vibrate(&self, duration: VibrationDuration) -> ProtocolResult<()> {
        self.transport
            .write_command(&CommandFrame::vibrate(duration))
            .await
    }

    /// Set the logo and bar LED colors.
    pub async fn set_led(&self, logo: [u8; 3], bar: [u8; 3]) -> ProtocolResult<()> {
        self.transport
            .write_command(&CommandFrame::set_led(logo, bar))
            .await
    }

    /// Configure the firmware sleep policy.
    pub async fn set_sleep_mode(&self, mode: SleepMode) -> ProtocolResult<()> {
        self.transport
            .write_command(&CommandFrame::set_sleep_mode(mode))
            .await
    }

    /// Change the lock state.
    pub async fn unlock(&self, kind: UnlockKind) -> ProtocolResult<()> {
        self.transport.write_command(&CommandFrame::unlock(kind)).await
    }

    /// Notify the firmware of a user action (resets the inactivity timer).
    pub async fn user_action(&self, kind: UserActionKind) -> ProtocolResult<()> {
        self.transport
            .write_command(&CommandFrame::user_action(kind))
            .await
    }

    /// Put the device into deep sleep. It stays asleep until plugged in,
    /// so this is effectively a disconnect.
    pub async fn deep_sleep(&self) -> ProtocolResult<()> {
        self.transport.write_command(&CommandFrame::deep_sleep()).await
    }

    async fn apply(&self, transition: ModeTransition) -> ProtocolResult<()> {
        self.transport.write_command(&transition.frame).await?;

        for action in transition.actions {
            debug!(?action, "applying subscription action");
            match action {
                SubscriptionAction::Subscribe(source) => {
                    self.transport.subscribe(source).await?;
                }
                SubscriptionAction::Unsubscribe(source) => {
                    self.transport.unsubscribe(source).await?;
                }
            }
        }
        Ok(())
    }
}
