// src/protocol/types.rs
//! Typed notification payloads and the event union
//!
//! One struct per notification source; decoding lives in
//! [`crate::protocol::decode`]. All values are preserved device-reported:
//! the battery percentage is not clamped, the 50 Hz intensity byte and the
//! device-info reserved bytes are carried opaquely.

use crate::protocol::characteristics::{
    SourceId, IMU_ACCEL_SCALE, IMU_GYRO_SCALE, IMU_ORIENTATION_SCALE,
};
use crate::protocol::classifier::ClassifierEvent;
use serde::{Deserialize, Serialize};

/// Firmware and hardware revision record (4 × u16 little-endian).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareRevision {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    pub hardware: u16,
}

impl std::fmt::Display for FirmwareRevision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.hardware
        )
    }
}

/// Which onboard classifier the firmware is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveClassifierType {
    /// Factory-trained classifier shipped with the firmware.
    BuiltIn,
    /// User-trained personalized classifier.
    Personalized,
    /// Value outside the documented range, preserved as reported.
    Unknown(u8),
}

impl From<u8> for ActiveClassifierType {
    fn from(value: u8) -> Self {
        match value {
            0 => ActiveClassifierType::BuiltIn,
            1 => ActiveClassifierType::Personalized,
            other => ActiveClassifierType::Unknown(other),
        }
    }
}

/// Hardware SKU classification from the device-info record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sku {
    /// Pre-release hardware that predates the SKU byte.
    UnknownOld,
    /// Black retail unit.
    Black,
    /// White retail unit.
    White,
    /// Value outside the documented range, preserved as reported.
    Unrecognized(u8),
}

impl From<u8> for Sku {
    fn from(value: u8) -> Self {
        match value {
            0 => Sku::UnknownOld,
            1 => Sku::Black,
            2 => Sku::White,
            other => Sku::Unrecognized(other),
        }
    }
}

impl std::fmt::Display for Sku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sku::UnknownOld => write!(f, "Unknown (old)"),
            Sku::Black => write!(f, "Black"),
            Sku::White => write!(f, "White"),
            Sku::Unrecognized(value) => write!(f, "Unrecognized ({})", value),
        }
    }
}

/// Device-info record read from the control service (20-byte layout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Six raw serial-number bytes.
    pub serial: [u8; 6],
    /// Pose the device interprets as the unlock gesture.
    pub unlock_pose: u16,
    /// Which classifier implementation is active.
    pub active_classifier_type: ActiveClassifierType,
    /// Index of the active classifier.
    pub active_classifier_index: u8,
    /// Whether a user-trained classifier is stored on the device.
    pub has_custom_classifier: bool,
    /// Whether the firmware streams classifier output over the indicate
    /// channel instead of notify.
    pub stream_indicating: bool,
    /// Hardware SKU.
    pub sku: Sku,
    /// Trailing reserved bytes, undocumented; preserved opaquely.
    pub reserved: [u8; 7],
}

impl DeviceInfo {
    /// Serial number rendered the way the device tooling prints it,
    /// e.g. `"142-18-96-203-7-84"`.
    pub fn serial_string(&self) -> String {
        self.serial
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// One raw EMG notification: two consecutive 5 ms sub-frames of 8 channels.
///
/// Channel values are signed 8-bit ADC counts. `source` is the cyclic
/// source index 0–3; together the four sources carry the 200 Hz stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEmgFrame {
    /// Cyclic source id, 0..=3.
    pub source: u8,
    /// 16 signed samples: channels 0–7 of the first sub-frame, then
    /// channels 0–7 of the second.
    pub samples: [i8; 16],
}

impl RawEmgFrame {
    /// Split into the two 8-channel sub-frames, oldest first.
    pub fn sub_frames(&self) -> [[i8; 8]; 2] {
        let mut first = [0i8; 8];
        let mut second = [0i8; 8];
        first.copy_from_slice(&self.samples[..8]);
        second.copy_from_slice(&self.samples[8..]);
        [first, second]
    }
}

/// One filtered 50 Hz EMG notification (8 × i16 channels + intensity byte).
///
/// Emitted as a standalone typed event; never merged into the 200 Hz
/// reconstructed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteredEmgFrame {
    /// Filtered channel values 0–7.
    pub channels: [i16; 8],
    /// Trailing byte, observed 0–7 and rising with pose intensity.
    /// Undocumented; passed through without interpretation.
    pub intensity: u8,
}

/// One IMU notification: orientation quaternion, accelerometer, gyroscope.
///
/// Values are raw fixed-point i16 counts; use the scaled accessors for
/// physical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImuFrame {
    /// Quaternion w, x, y, z.
    pub orientation: [i16; 4],
    /// Accelerometer x, y, z.
    pub accelerometer: [i16; 3],
    /// Gyroscope x, y, z.
    pub gyroscope: [i16; 3],
}

impl ImuFrame {
    /// Orientation quaternion in unit-quaternion scale.
    pub fn orientation_units(&self) -> [f32; 4] {
        self.orientation.map(|v| v as f32 / IMU_ORIENTATION_SCALE)
    }

    /// Acceleration in g.
    pub fn accelerometer_g(&self) -> [f32; 3] {
        self.accelerometer.map(|v| v as f32 / IMU_ACCEL_SCALE)
    }

    /// Angular rate in °/s.
    pub fn gyroscope_dps(&self) -> [f32; 3] {
        self.gyroscope.map(|v| v as f32 / IMU_GYRO_SCALE)
    }
}

/// A decoded notification from any device endpoint.
///
/// Total over the known source set; payloads from endpoints the core does
/// not recognize arrive as [`Event::UnknownSource`] rather than an error,
/// since undocumented vendor characteristics exist on this hardware.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Battery percentage as reported (not clamped; out-of-range values
    /// pass through).
    Battery(u8),
    /// Firmware/hardware revision record.
    Revision(FirmwareRevision),
    /// Classifier indication (arm sync, pose, lock state).
    Classifier(ClassifierEvent),
    /// Filtered 50 Hz EMG frame.
    FilteredEmg(FilteredEmgFrame),
    /// Raw EMG frame from one of the four cyclic sources.
    RawEmg(RawEmgFrame),
    /// IMU data frame.
    Imu(ImuFrame),
    /// Notification from an endpoint the core does not recognize.
    UnknownSource {
        /// The unrecognized attribute handle.
        source: SourceId,
        /// Raw payload bytes, untouched.
        data: Vec<u8>,
    },
}
