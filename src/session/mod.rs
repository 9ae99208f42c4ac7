// src/session/mod.rs
//! Session and mode model
//!
//! Tracks the current (EMG, IMU, classifier) mode triple and turns mode
//! change requests into data: the full `set modes` command frame (the
//! device always sets all three fields atomically) plus the list of
//! subscribe/unsubscribe actions the caller must apply to the transport.
//! The session never touches the transport itself.

pub mod controller;

use crate::protocol::characteristics::SourceId;
use crate::protocol::command::CommandFrame;
use serde::{Deserialize, Serialize};

pub use controller::SessionController;

/// EMG streaming mode. The device samples at a constant 200 Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum EmgMode {
    /// Do not send EMG data.
    Off = 0,
    /// Undocumented filtered 50 Hz stream.
    Filtered50Hz = 1,
    /// Filtered EMG data on the four raw sources.
    Filtered = 2,
    /// Raw (unfiltered) EMG data on the four raw sources.
    Raw = 3,
}

impl EmgMode {
    fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(EmgMode::Off),
            1 => Some(EmgMode::Filtered50Hz),
            2 => Some(EmgMode::Filtered),
            3 => Some(EmgMode::Raw),
            _ => None,
        }
    }

    /// The notification sources this mode streams on.
    fn sources(self) -> &'static [SourceId] {
        match self {
            EmgMode::Off => &[],
            EmgMode::Filtered50Hz => &[SourceId::FILTERED_50HZ],
            EmgMode::Filtered | EmgMode::Raw => &SourceId::RAW_EMG,
        }
    }
}

/// IMU streaming mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ImuMode {
    /// Do not send IMU data or events.
    Off = 0,
    /// Send IMU data streams (accelerometer, gyroscope, orientation).
    SendData = 1,
    /// Send motion events detected by the IMU (e.g. taps).
    SendEvents = 2,
    /// Send both data streams and motion events.
    SendAll = 3,
    /// Send raw IMU data streams.
    SendRaw = 4,
}

impl ImuMode {
    fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ImuMode::Off),
            1 => Some(ImuMode::SendData),
            2 => Some(ImuMode::SendEvents),
            3 => Some(ImuMode::SendAll),
            4 => Some(ImuMode::SendRaw),
            _ => None,
        }
    }
}

/// Onboard classifier mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ClassifierMode {
    /// Disable and reset the internal classifier state.
    Disabled = 0,
    /// Send classifier events (poses and arm events).
    Enabled = 1,
}

impl ClassifierMode {
    fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ClassifierMode::Disabled),
            1 => Some(ClassifierMode::Enabled),
            _ => None,
        }
    }
}

/// The mode triple carried by every `set modes` command.
///
/// Exactly one configuration is current per session; transitions go through
/// [`Session`] so the outbound frame and the subscription side effects stay
/// consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeConfiguration {
    /// EMG streaming mode.
    pub emg: EmgMode,
    /// IMU streaming mode.
    pub imu: ImuMode,
    /// Onboard classifier mode.
    pub classifier: ClassifierMode,
}

impl Default for ModeConfiguration {
    fn default() -> Self {
        Self {
            emg: EmgMode::Off,
            imu: ImuMode::Off,
            classifier: ClassifierMode::Disabled,
        }
    }
}

impl ModeConfiguration {
    /// Decode a 3-byte `set modes` command payload back into the triple.
    ///
    /// Returns `None` for a wrong length or a byte outside its closed
    /// enumeration.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        if payload.len() != 3 {
            return None;
        }
        Some(Self {
            emg: EmgMode::from_u8(payload[0])?,
            imu: ImuMode::from_u8(payload[1])?,
            classifier: ClassifierMode::from_u8(payload[2])?,
        })
    }
}

/// A subscription side effect the caller must apply to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionAction {
    /// Start notifications from the source.
    Subscribe(SourceId),
    /// Stop notifications from the source.
    Unsubscribe(SourceId),
}

/// A mode transition: the command frame to write plus the subscription
/// actions to apply, in order.
#[derive(Debug)]
pub struct ModeTransition {
    /// The full-triple `set modes` frame reflecting the new configuration.
    pub frame: CommandFrame,
    /// Subscribe/unsubscribe actions required by the transition.
    pub actions: Vec<SubscriptionAction>,
}

/// Session-scoped mode state.
///
/// Mutated only through the `request_*` transition operations, which return
/// side effects as data rather than applying them.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: ModeConfiguration,
}

impl Session {
    /// Start a session with all streams off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from a known configuration.
    pub fn with_configuration(config: ModeConfiguration) -> Self {
        Self { current: config }
    }

    /// The current mode triple.
    pub fn configuration(&self) -> ModeConfiguration {
        self.current
    }

    /// Request a new EMG mode.
    ///
    /// Subscription rules mirror observed device behavior: entering an
    /// active mode from OFF subscribes that mode's sources, leaving to OFF
    /// unsubscribes the old mode's sources, and switching directly between
    /// two active modes changes only the command payload.
    pub fn request_emg_mode(&mut self, new_mode: EmgMode) -> ModeTransition {
        let old_mode = self.current.emg;
        self.current.emg = new_mode;

        let mut actions = Vec::new();
        match (old_mode, new_mode) {
            (EmgMode::Off, _) => {
                for &source in new_mode.sources() {
                    actions.push(SubscriptionAction::Subscribe(source));
                }
            }
            (_, EmgMode::Off) => {
                for &source in old_mode.sources() {
                    actions.push(SubscriptionAction::Unsubscribe(source));
                }
            }
            // Active to active: only the command payload changes.
            _ => {}
        }

        ModeTransition {
            frame: CommandFrame::set_modes(self.current),
            actions,
        }
    }

    /// Request a new IMU mode. OFF ⇄ active toggles the IMU source;
    /// switching between active modes does not.
    pub fn request_imu_mode(&mut self, new_mode: ImuMode) -> ModeTransition {
        let old_mode = self.current.imu;
        self.current.imu = new_mode;

        let mut actions = Vec::new();
        match (old_mode, new_mode) {
            (ImuMode::Off, ImuMode::Off) => {}
            (ImuMode::Off, _) => actions.push(SubscriptionAction::Subscribe(SourceId::IMU)),
            (_, ImuMode::Off) => actions.push(SubscriptionAction::Unsubscribe(SourceId::IMU)),
            _ => {}
        }

        ModeTransition {
            frame: CommandFrame::set_modes(self.current),
            actions,
        }
    }

    /// Request a new classifier mode. ENABLED ⇄ DISABLED toggles the
    /// classifier indication source.
    pub fn request_classifier_mode(&mut self, new_mode: ClassifierMode) -> ModeTransition {
        let old_mode = self.current.classifier;
        self.current.classifier = new_mode;

        let mut actions = Vec::new();
        match (old_mode, new_mode) {
            (ClassifierMode::Disabled, ClassifierMode::Enabled) => {
                actions.push(SubscriptionAction::Subscribe(SourceId::CLASSIFIER));
            }
            (ClassifierMode::Enabled, ClassifierMode::Disabled) => {
                actions.push(SubscriptionAction::Unsubscribe(SourceId::CLASSIFIER));
            }
            _ => {}
        }

        ModeTransition {
            frame: CommandFrame::set_modes(self.current),
            actions,
        }
    }
}
