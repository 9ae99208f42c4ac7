// src/protocol/characteristics.rs
//! GATT UUIDs and notification attribute handles for the Myo armband.
//!
//! All vendor characteristics live in the Myo namespace
//! `d506XXXX-a904-deb9-4748-2c7f4a124842`; battery level uses the
//! Bluetooth-SIG standard battery service.
//!
//! The device reports notifications by attribute *handle*, not by UUID, so
//! both are declared here. Handle values are those the hardware exposes in
//! its fixed attribute table:
//!
//! | Handle | Characteristic | Payload |
//! |--------|----------------|---------|
//! | 16     | battery level  | 1 byte  |
//! | 28     | IMU data       | 20 bytes |
//! | 34     | classifier event | 6 bytes |
//! | 38     | filtered 50 Hz EMG | 17 bytes |
//! | 42     | raw EMG 0      | 16 bytes |
//! | 45     | raw EMG 1      | 16 bytes |
//! | 48     | raw EMG 2      | 16 bytes |
//! | 51     | raw EMG 3      | 16 bytes |

use uuid::Uuid;

// ── Services ─────────────────────────────────────────────────────────────────

/// Control service UUID advertised by every Myo; used as a scan filter.
pub const CONTROL_SERVICE_UUID: Uuid = Uuid::from_u128(0xd5060001_a904_deb9_4748_2c7f4a124842);

// ── Characteristics ──────────────────────────────────────────────────────────

/// Device info characteristic (readable, 20-byte record).
pub const DEVICE_INFO_CHARACTERISTIC: Uuid =
    Uuid::from_u128(0xd5060101_a904_deb9_4748_2c7f4a124842);

/// Firmware revision characteristic (readable, 4 × u16 LE).
pub const REVISION_CHARACTERISTIC: Uuid =
    Uuid::from_u128(0xd5060201_a904_deb9_4748_2c7f4a124842);

/// Command characteristic (write-only, length-prefixed command frames).
pub const COMMAND_CHARACTERISTIC: Uuid = Uuid::from_u128(0xd5060401_a904_deb9_4748_2c7f4a124842);

/// IMU data characteristic — 10 × i16 LE per notification.
pub const IMU_DATA_CHARACTERISTIC: Uuid = Uuid::from_u128(0xd5060402_a904_deb9_4748_2c7f4a124842);

/// Classifier event characteristic (indicate, 6-byte payload).
pub const CLASSIFIER_EVENT_CHARACTERISTIC: Uuid =
    Uuid::from_u128(0xd5060103_a904_deb9_4748_2c7f4a124842);

/// Undocumented filtered 50 Hz EMG characteristic (8 × i16 + intensity byte).
pub const FILTERED_50HZ_CHARACTERISTIC: Uuid =
    Uuid::from_u128(0xd5060104_a904_deb9_4748_2c7f4a124842);

/// Raw EMG characteristics, indexed by cyclic source id 0–3.
///
/// Together the four sources carry one 200 Hz 8-channel stream: each
/// notification holds two consecutive 5 ms sub-frames, and the sources
/// fire in strict cyclic order 0→1→2→3→0…
pub const RAW_EMG_CHARACTERISTICS: [Uuid; 4] = [
    Uuid::from_u128(0xd5060105_a904_deb9_4748_2c7f4a124842), // EMG 0
    Uuid::from_u128(0xd5060205_a904_deb9_4748_2c7f4a124842), // EMG 1
    Uuid::from_u128(0xd5060305_a904_deb9_4748_2c7f4a124842), // EMG 2
    Uuid::from_u128(0xd5060405_a904_deb9_4748_2c7f4a124842), // EMG 3
];

/// Standard battery level characteristic (Bluetooth SIG 0x2A19).
pub const BATTERY_LEVEL_CHARACTERISTIC: Uuid =
    Uuid::from_u128(0x00002a19_0000_1000_8000_00805f9b34fb);

// ── Notification handles ─────────────────────────────────────────────────────

/// An addressable notification endpoint, identified by attribute handle.
///
/// Wraps the raw `u16` the BLE stack hands to the notification callback.
/// Unknown handles are legal input everywhere in the core (undocumented
/// vendor characteristics exist on this hardware).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u16);

impl SourceId {
    /// Battery level notifications.
    pub const BATTERY: SourceId = SourceId(16);
    /// IMU data notifications.
    pub const IMU: SourceId = SourceId(28);
    /// Classifier event indications.
    pub const CLASSIFIER: SourceId = SourceId(34);
    /// Filtered 50 Hz EMG notifications.
    pub const FILTERED_50HZ: SourceId = SourceId(38);
    /// Raw EMG notification sources in cyclic order.
    pub const RAW_EMG: [SourceId; 4] = [SourceId(42), SourceId(45), SourceId(48), SourceId(51)];

    /// Cyclic source index (0–3) if this is one of the raw EMG endpoints.
    pub fn raw_emg_index(self) -> Option<u8> {
        Self::RAW_EMG
            .iter()
            .position(|&s| s == self)
            .map(|i| i as u8)
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "handle {}", self.0)
    }
}

// ── Sampling constants ───────────────────────────────────────────────────────

/// Nominal EMG sample rate in Hz across the four raw sources combined.
pub const EMG_SAMPLE_RATE_HZ: u32 = 200;

/// EMG channel count per sample.
pub const EMG_CHANNELS: usize = 8;

/// Samples per raw EMG notification (two 5 ms sub-frames of 8 channels).
pub const SAMPLES_PER_RAW_FRAME: usize = 2;

/// Fixed-point divisor for IMU orientation quaternion units.
pub const IMU_ORIENTATION_SCALE: f32 = 16384.0;

/// Fixed-point divisor for IMU accelerometer units (g).
pub const IMU_ACCEL_SCALE: f32 = 2048.0;

/// Fixed-point divisor for IMU gyroscope units (°/s).
pub const IMU_GYRO_SCALE: f32 = 16.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_emg_index() {
        assert_eq!(SourceId(42).raw_emg_index(), Some(0));
        assert_eq!(SourceId(45).raw_emg_index(), Some(1));
        assert_eq!(SourceId(48).raw_emg_index(), Some(2));
        assert_eq!(SourceId(51).raw_emg_index(), Some(3));
        assert_eq!(SourceId(16).raw_emg_index(), None);
    }

    #[test]
    fn test_vendor_namespace() {
        for uuid in RAW_EMG_CHARACTERISTICS {
            assert!(uuid.to_string().ends_with("a904-deb9-4748-2c7f4a124842"));
        }
    }
}
