// src/protocol/mod.rs
//! Myo wire protocol: characteristics, codecs, commands, and decoders

pub mod characteristics;
pub mod classifier;
pub mod codec;
pub mod command;
pub mod decode;
pub mod types;

pub use characteristics::{SourceId, EMG_CHANNELS, EMG_SAMPLE_RATE_HZ};
pub use classifier::{decode_classifier, Arm, ClassifierEvent, Pose, XDirection};
pub use command::{
    CommandFrame, Opcode, SleepMode, UnlockKind, UserActionKind, VibrationDuration, VibrationStep,
};
pub use decode::{
    decode_battery, decode_device_info, decode_filtered_emg, decode_imu, decode_raw_emg,
    decode_revision, Dispatcher,
};
pub use types::{
    ActiveClassifierType, DeviceInfo, Event, FilteredEmgFrame, FirmwareRevision, ImuFrame,
    RawEmgFrame, Sku,
};
