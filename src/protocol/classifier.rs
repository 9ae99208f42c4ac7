// src/protocol/classifier.rs
//! Classifier indication decoding
//!
//! The onboard classifier reports arm sync state, poses, and lock state via
//! a 6-byte indication. Decoding is a pure, total function: unrecognized
//! event ids yield [`ClassifierEvent::Unknown`], unrecognized value ids
//! collapse to the enums' `Unknown` variants. It never fails or panics on
//! a 6-byte input; only a wrong payload length is an error.

use crate::error::ProtocolResult;
use crate::protocol::codec::ensure_len;
use serde::{Deserialize, Serialize};

/// Classifier indication payload length in bytes.
pub const CLASSIFIER_PAYLOAD_LEN: usize = 6;

/// Which arm the band is worn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Arm {
    Right,
    Left,
    Unknown,
}

impl From<u8> for Arm {
    fn from(value: u8) -> Self {
        match value {
            1 => Arm::Right,
            2 => Arm::Left,
            _ => Arm::Unknown,
        }
    }
}

/// Orientation of the band's positive x axis along the forearm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum XDirection {
    TowardWrist,
    TowardElbow,
    Unknown,
}

impl From<u8> for XDirection {
    fn from(value: u8) -> Self {
        match value {
            1 => XDirection::TowardWrist,
            2 => XDirection::TowardElbow,
            _ => XDirection::Unknown,
        }
    }
}

/// Hand pose recognized by the onboard classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Pose {
    Rest,
    Fist,
    WaveIn,
    WaveOut,
    FingersSpread,
    DoubleTap,
    Unknown,
}

impl From<u8> for Pose {
    fn from(value: u8) -> Self {
        match value {
            0 => Pose::Rest,
            1 => Pose::Fist,
            2 => Pose::WaveIn,
            3 => Pose::WaveOut,
            4 => Pose::FingersSpread,
            5 => Pose::DoubleTap,
            _ => Pose::Unknown,
        }
    }
}

/// A decoded classifier indication.
///
/// Byte 0 selects the event, bytes 1–2 carry event-dependent values,
/// bytes 3–5 are reserved and preserved opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifierEvent {
    /// The band synced to an arm.
    ArmSynced {
        /// Which arm the band is on.
        arm: Arm,
        /// Band orientation along the forearm.
        x_direction: XDirection,
    },
    /// The band lost its arm sync.
    ArmUnsynced,
    /// A pose was recognized.
    Pose {
        /// The recognized pose.
        pose: Pose,
    },
    /// The band unlocked.
    Unlocked,
    /// The band locked.
    Locked,
    /// A sync gesture was attempted and failed.
    SyncFailed,
    /// Event id outside the documented 1..=6 range.
    Unknown {
        /// Raw event id byte.
        event_id: u8,
        /// Raw value byte.
        value_id: u8,
        /// Raw x-direction byte.
        x_direction_id: u8,
    },
}

/// Decode a 6-byte classifier indication payload.
///
/// Total over all 6-byte inputs; only a wrong length is an error.
/// The three trailing reserved bytes are validated for presence and
/// otherwise ignored.
pub fn decode_classifier(data: &[u8]) -> ProtocolResult<ClassifierEvent> {
    ensure_len("classifier indication", CLASSIFIER_PAYLOAD_LEN, data)?;

    let event_id = data[0];
    let value_id = data[1];
    let x_direction_id = data[2];
    // data[3..6] reserved

    let event = match event_id {
        1 => ClassifierEvent::ArmSynced {
            arm: Arm::from(value_id),
            x_direction: XDirection::from(x_direction_id),
        },
        2 => ClassifierEvent::ArmUnsynced,
        3 => ClassifierEvent::Pose {
            pose: Pose::from(value_id),
        },
        4 => ClassifierEvent::Unlocked,
        5 => ClassifierEvent::Locked,
        6 => ClassifierEvent::SyncFailed,
        _ => ClassifierEvent::Unknown {
            event_id,
            value_id,
            x_direction_id,
        },
    };

    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    #[test]
    fn test_arm_synced() {
        let event = decode_classifier(&[1, 1, 2, 0, 0, 0]).unwrap();
        assert_eq!(
            event,
            ClassifierEvent::ArmSynced {
                arm: Arm::Right,
                x_direction: XDirection::TowardElbow,
            }
        );
    }

    #[test]
    fn test_arm_synced_unknown_values() {
        // 255 is the device's own "unknown" marker for both fields
        let event = decode_classifier(&[1, 255, 255, 0, 0, 0]).unwrap();
        assert_eq!(
            event,
            ClassifierEvent::ArmSynced {
                arm: Arm::Unknown,
                x_direction: XDirection::Unknown,
            }
        );
    }

    #[test]
    fn test_poses() {
        for (value, pose) in [
            (0, Pose::Rest),
            (1, Pose::Fist),
            (2, Pose::WaveIn),
            (3, Pose::WaveOut),
            (4, Pose::FingersSpread),
            (5, Pose::DoubleTap),
            (6, Pose::Unknown),
            (255, Pose::Unknown),
        ] {
            let event = decode_classifier(&[3, value, 0, 0, 0, 0]).unwrap();
            assert_eq!(event, ClassifierEvent::Pose { pose });
        }
    }

    #[test]
    fn test_valueless_events() {
        assert_eq!(
            decode_classifier(&[2, 0, 0, 0, 0, 0]).unwrap(),
            ClassifierEvent::ArmUnsynced
        );
        assert_eq!(
            decode_classifier(&[4, 0, 0, 0, 0, 0]).unwrap(),
            ClassifierEvent::Unlocked
        );
        assert_eq!(
            decode_classifier(&[5, 0, 0, 0, 0, 0]).unwrap(),
            ClassifierEvent::Locked
        );
        assert_eq!(
            decode_classifier(&[6, 0, 0, 0, 0, 0]).unwrap(),
            ClassifierEvent::SyncFailed
        );
    }

    #[test]
    fn test_unknown_event_id() {
        // Event id 7 has been observed in the wild exactly once
        let event = decode_classifier(&[7, 3, 9, 0, 0, 0]).unwrap();
        assert_eq!(
            event,
            ClassifierEvent::Unknown {
                event_id: 7,
                value_id: 3,
                x_direction_id: 9,
            }
        );
    }

    #[test]
    fn test_reserved_bytes_ignored() {
        let a = decode_classifier(&[4, 0, 0, 0, 0, 0]).unwrap();
        let b = decode_classifier(&[4, 0, 0, 0xDE, 0xAD, 0xBE]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wrong_length() {
        let err = decode_classifier(&[1, 0, 0, 0, 0]).unwrap_err();
        assert_eq!(err, ProtocolError::malformed("classifier indication", 6, 5));
        assert!(decode_classifier(&[1, 0, 0, 0, 0, 0, 0]).is_err());
    }
}
