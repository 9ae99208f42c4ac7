// src/protocol/command.rs
//! Outbound command frame construction
//!
//! One constructor per opcode family. Each constructor validates its inputs
//! against the fixed payload shape for its opcode and fails with
//! [`crate::error::ProtocolError::InvalidCommandArgument`] before any bytes
//! are produced. Frames are built on demand and not retained; the caller
//! writes the encoded bytes to the command characteristic.

use crate::error::{ProtocolError, ProtocolResult};
use crate::protocol::codec::{pack_command, write_u16_le};
use crate::session::ModeConfiguration;
use serde::{Deserialize, Serialize};

/// Maximum payload length of any command frame (extended vibrate, 6 steps).
pub const MAX_COMMAND_PAYLOAD: usize = 18;

/// Command opcodes understood by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    /// Set EMG, IMU, and classifier modes atomically.
    SetModes = 0x01,
    /// Single vibration.
    Vibrate = 0x03,
    /// Deep sleep; only USB power wakes the device afterwards.
    DeepSleep = 0x04,
    /// Set logo and bar LED colors.
    Led = 0x06,
    /// Patterned vibration, up to 6 steps.
    VibrateExtended = 0x07,
    /// Set sleep mode.
    SetSleepMode = 0x09,
    /// Unlock the device.
    Unlock = 0x0A,
    /// Notify the user that an action was recognized.
    UserAction = 0x0B,
}

/// Vibration duration for the simple vibrate command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum VibrationDuration {
    None = 0,
    Short = 1,
    Medium = 2,
    Long = 3,
}

/// One step of a patterned vibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibrationStep {
    /// Step duration in milliseconds.
    pub duration_ms: u16,
    /// Motor strength, 0 (off) to 255 (full speed).
    pub strength: u8,
}

/// Sleep behavior while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum SleepMode {
    /// Sleep after a period of inactivity.
    Normal = 0,
    /// Never go to sleep.
    NeverSleep = 1,
}

/// Unlock behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum UnlockKind {
    /// Unlock then re-lock immediately.
    Relock = 0,
    /// Unlock now, re-lock after a fixed timeout.
    Timed = 1,
    /// Unlock now, stay unlocked until a lock command arrives.
    Hold = 2,
}

/// User action acknowledgement kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum UserActionKind {
    /// A single, discrete action (e.g. pausing a video).
    Single = 0,
}

/// An encoded outbound command.
///
/// Invariant: total wire length = 2 + payload length, payload length and
/// layout fixed per opcode, payload never exceeds [`MAX_COMMAND_PAYLOAD`]
/// bytes. Constructed only through the typed builders below, so the
/// invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    opcode: Opcode,
    payload: Vec<u8>,
}

impl CommandFrame {
    /// Set all three modes atomically (the device command always carries
    /// the full triple).
    pub fn set_modes(config: ModeConfiguration) -> CommandFrame {
        CommandFrame {
            opcode: Opcode::SetModes,
            payload: vec![
                config.emg as u8,
                config.imu as u8,
                config.classifier as u8,
            ],
        }
    }

    /// Vibrate once for a fixed duration.
    pub fn vibrate(duration: VibrationDuration) -> CommandFrame {
        CommandFrame {
            opcode: Opcode::Vibrate,
            payload: vec![duration as u8],
        }
    }

    /// Patterned vibration of 1 to 6 steps.
    ///
    /// Each step contributes 3 payload bytes (duration u16 LE, strength u8);
    /// 6 steps produce the 18-byte maximum payload.
    pub fn vibrate_extended(steps: &[VibrationStep]) -> ProtocolResult<CommandFrame> {
        if steps.is_empty() || steps.len() > 6 {
            return Err(ProtocolError::invalid_argument(
                "vibrate2",
                format!("step count must be 1..=6, got {}", steps.len()),
            ));
        }

        let mut payload = Vec::with_capacity(steps.len() * 3);
        for step in steps {
            write_u16_le(&mut payload, step.duration_ms);
            payload.push(step.strength);
        }

        Ok(CommandFrame {
            opcode: Opcode::VibrateExtended,
            payload,
        })
    }

    /// Set the logo and bar LED colors (RGB each).
    pub fn set_led(logo_rgb: [u8; 3], bar_rgb: [u8; 3]) -> CommandFrame {
        let mut payload = Vec::with_capacity(6);
        payload.extend_from_slice(&logo_rgb);
        payload.extend_from_slice(&bar_rgb);
        CommandFrame {
            opcode: Opcode::Led,
            payload,
        }
    }

    /// Set the sleep mode.
    pub fn set_sleep_mode(mode: SleepMode) -> CommandFrame {
        CommandFrame {
            opcode: Opcode::SetSleepMode,
            payload: vec![mode as u8],
        }
    }

    /// Unlock the device.
    pub fn unlock(kind: UnlockKind) -> CommandFrame {
        CommandFrame {
            opcode: Opcode::Unlock,
            payload: vec![kind as u8],
        }
    }

    /// Put the device into deep sleep. It disconnects immediately and only
    /// wakes when plugged into USB.
    pub fn deep_sleep() -> CommandFrame {
        CommandFrame {
            opcode: Opcode::DeepSleep,
            payload: Vec::new(),
        }
    }

    /// Acknowledge a recognized user action.
    pub fn user_action(kind: UserActionKind) -> CommandFrame {
        CommandFrame {
            opcode: Opcode::UserAction,
            payload: vec![kind as u8],
        }
    }

    /// The frame's opcode.
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// The opcode-specific payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Encode to the wire format `[opcode][payload_len][payload...]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        pack_command(self.opcode as u8, &self.payload)
    }
}
