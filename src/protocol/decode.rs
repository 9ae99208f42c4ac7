// src/protocol/decode.rs
//! Notification payload decoders and the source dispatcher
//!
//! Each decoder is a pure function over a fixed-width little-endian layout;
//! the [`Dispatcher`] maps attribute handles to decoders through a table
//! built once at startup. Unknown handles are not errors — they produce
//! [`Event::UnknownSource`] so undocumented vendor characteristics pass
//! through as data.

use crate::error::ProtocolResult;
use crate::protocol::characteristics::SourceId;
use crate::protocol::classifier::decode_classifier;
use crate::protocol::codec::{ensure_len, read_i16_le_array, read_i8, read_u16_le};
use crate::protocol::types::{
    ActiveClassifierType, DeviceInfo, Event, FilteredEmgFrame, FirmwareRevision, ImuFrame,
    RawEmgFrame, Sku,
};
use std::collections::HashMap;
use tracing::debug;

/// Battery payload length in bytes.
pub const BATTERY_PAYLOAD_LEN: usize = 1;
/// Firmware revision payload length in bytes.
pub const REVISION_PAYLOAD_LEN: usize = 8;
/// Device info payload length in bytes.
pub const DEVICE_INFO_PAYLOAD_LEN: usize = 20;
/// Raw EMG payload length in bytes (16 × i8).
pub const RAW_EMG_PAYLOAD_LEN: usize = 16;
/// Filtered 50 Hz payload length in bytes (8 × i16 + intensity byte).
pub const FILTERED_EMG_PAYLOAD_LEN: usize = 17;
/// IMU payload length in bytes (10 × i16).
pub const IMU_PAYLOAD_LEN: usize = 20;

/// Decode a battery level notification.
///
/// Single unsigned byte, device-reported percentage. Out-of-range values
/// are passed through, not clamped.
pub fn decode_battery(data: &[u8]) -> ProtocolResult<u8> {
    ensure_len("battery level", BATTERY_PAYLOAD_LEN, data)?;
    Ok(data[0])
}

/// Decode the firmware revision record (4 × u16 LE).
pub fn decode_revision(data: &[u8]) -> ProtocolResult<FirmwareRevision> {
    ensure_len("firmware revision", REVISION_PAYLOAD_LEN, data)?;
    Ok(FirmwareRevision {
        major: read_u16_le(data, 0),
        minor: read_u16_le(data, 2),
        patch: read_u16_le(data, 4),
        hardware: read_u16_le(data, 6),
    })
}

/// Decode the 20-byte device-info record.
///
/// Layout: serial[6], unlock-pose u16, classifier-type, classifier-index,
/// has-custom-classifier, stream-indicating, SKU, reserved[7].
pub fn decode_device_info(data: &[u8]) -> ProtocolResult<DeviceInfo> {
    ensure_len("device info", DEVICE_INFO_PAYLOAD_LEN, data)?;

    let mut serial = [0u8; 6];
    serial.copy_from_slice(&data[..6]);
    let mut reserved = [0u8; 7];
    reserved.copy_from_slice(&data[13..20]);

    Ok(DeviceInfo {
        serial,
        unlock_pose: read_u16_le(data, 6),
        active_classifier_type: ActiveClassifierType::from(data[8]),
        active_classifier_index: data[9],
        has_custom_classifier: data[10] != 0,
        stream_indicating: data[11] != 0,
        sku: Sku::from(data[12]),
        reserved,
    })
}

/// Decode one raw EMG notification (16 × i8) from cyclic source `source`.
pub fn decode_raw_emg(source: u8, data: &[u8]) -> ProtocolResult<RawEmgFrame> {
    ensure_len("raw EMG", RAW_EMG_PAYLOAD_LEN, data)?;

    let mut samples = [0i8; 16];
    for (i, sample) in samples.iter_mut().enumerate() {
        *sample = read_i8(data, i);
    }

    Ok(RawEmgFrame { source, samples })
}

/// Decode one filtered 50 Hz EMG notification (8 × i16 + intensity byte).
pub fn decode_filtered_emg(data: &[u8]) -> ProtocolResult<FilteredEmgFrame> {
    ensure_len("filtered 50 Hz EMG", FILTERED_EMG_PAYLOAD_LEN, data)?;
    Ok(FilteredEmgFrame {
        channels: read_i16_le_array(data, 0),
        intensity: data[16],
    })
}

/// Decode one IMU notification (10 × i16): quaternion, accel, gyro.
pub fn decode_imu(data: &[u8]) -> ProtocolResult<ImuFrame> {
    ensure_len("IMU", IMU_PAYLOAD_LEN, data)?;
    let values: [i16; 10] = read_i16_le_array(data, 0);
    Ok(ImuFrame {
        orientation: [values[0], values[1], values[2], values[3]],
        accelerometer: [values[4], values[5], values[6]],
        gyroscope: [values[7], values[8], values[9]],
    })
}

type DecodeFn = Box<dyn Fn(&[u8]) -> ProtocolResult<Event> + Send + Sync>;

/// Handle-indexed notification dispatcher.
///
/// The handle → decoder table is built once at construction; [`decode`]
/// is a total function over all `(source, bytes)` pairs — unknown handles
/// yield [`Event::UnknownSource`], only malformed payloads from *known*
/// handles are errors.
///
/// [`decode`]: Dispatcher::decode
pub struct Dispatcher {
    table: HashMap<SourceId, DecodeFn>,
}

impl Dispatcher {
    /// Build the dispatch table for the device's notification endpoints.
    pub fn new() -> Self {
        let mut table: HashMap<SourceId, DecodeFn> = HashMap::new();

        table.insert(
            SourceId::BATTERY,
            Box::new(|data| decode_battery(data).map(Event::Battery)),
        );
        table.insert(
            SourceId::IMU,
            Box::new(|data| decode_imu(data).map(Event::Imu)),
        );
        table.insert(
            SourceId::CLASSIFIER,
            Box::new(|data| decode_classifier(data).map(Event::Classifier)),
        );
        table.insert(
            SourceId::FILTERED_50HZ,
            Box::new(|data| decode_filtered_emg(data).map(Event::FilteredEmg)),
        );
        for (index, source) in SourceId::RAW_EMG.into_iter().enumerate() {
            table.insert(
                source,
                Box::new(move |data| decode_raw_emg(index as u8, data).map(Event::RawEmg)),
            );
        }

        Self { table }
    }

    /// Decode one notification into a typed event.
    pub fn decode(&self, source: SourceId, data: &[u8]) -> ProtocolResult<Event> {
        match self.table.get(&source) {
            Some(decoder) => decoder(data),
            None => {
                debug!(source = source.0, len = data.len(), "unknown notification source");
                Ok(Event::UnknownSource {
                    source,
                    data: data.to_vec(),
                })
            }
        }
    }

    /// Whether `source` has a registered decoder.
    pub fn knows(&self, source: SourceId) -> bool {
        self.table.contains_key(&source)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use crate::protocol::classifier::ClassifierEvent;

    #[test]
    fn test_battery_passthrough() {
        assert_eq!(decode_battery(&[87]).unwrap(), 87);
        // Device-reported values above 100 are not clamped
        assert_eq!(decode_battery(&[255]).unwrap(), 255);
        assert!(decode_battery(&[]).is_err());
        assert!(decode_battery(&[1, 2]).is_err());
    }

    #[test]
    fn test_revision() {
        let data = [1, 0, 5, 0, 0xB2, 0x07, 2, 0];
        let rev = decode_revision(&data).unwrap();
        assert_eq!(rev.major, 1);
        assert_eq!(rev.minor, 5);
        assert_eq!(rev.patch, 1970);
        assert_eq!(rev.hardware, 2);
        assert_eq!(rev.to_string(), "1.5.1970.2");
    }

    #[test]
    fn test_device_info_fixed_sample() {
        let mut data = [0u8; 20];
        data[..6].copy_from_slice(&[142, 18, 96, 203, 7, 84]);
        data[6] = 5; // unlock pose: double tap
        data[8] = 1; // personalized classifier
        data[9] = 3;
        data[10] = 1;
        data[11] = 0;
        data[12] = 2; // white SKU

        let info = decode_device_info(&data).unwrap();
        assert_eq!(info.serial_string(), "142-18-96-203-7-84");
        assert_eq!(info.unlock_pose, 5);
        assert_eq!(
            info.active_classifier_type,
            ActiveClassifierType::Personalized
        );
        assert_eq!(info.active_classifier_index, 3);
        assert!(info.has_custom_classifier);
        assert!(!info.stream_indicating);
        assert_eq!(info.sku, Sku::White);
        assert_eq!(info.sku.to_string(), "White");
    }

    #[test]
    fn test_device_info_wrong_length() {
        assert_eq!(
            decode_device_info(&[0u8; 19]).unwrap_err(),
            ProtocolError::malformed("device info", 20, 19)
        );
        assert!(decode_device_info(&[0u8; 21]).is_err());
    }

    #[test]
    fn test_raw_emg() {
        let mut data = [0u8; 16];
        data[0] = 0x80; // -128
        data[15] = 0x7F; // 127
        let frame = decode_raw_emg(2, &data).unwrap();
        assert_eq!(frame.source, 2);
        assert_eq!(frame.samples[0], -128);
        assert_eq!(frame.samples[15], 127);
    }

    #[test]
    fn test_filtered_emg() {
        let mut data = [0u8; 17];
        data[0] = 0xFF;
        data[1] = 0xFF; // channel 0 = -1
        data[16] = 7; // intensity
        let frame = decode_filtered_emg(&data).unwrap();
        assert_eq!(frame.channels[0], -1);
        assert_eq!(frame.intensity, 7);

        assert!(decode_filtered_emg(&[0u8; 16]).is_err());
    }

    #[test]
    fn test_imu() {
        let mut data = [0u8; 20];
        data[0] = 0x00;
        data[1] = 0x40; // quat w = 16384
        data[8] = 0x00;
        data[9] = 0x08; // accel x = 2048
        data[14] = 0x10; // gyro x = 16
        let frame = decode_imu(&data).unwrap();
        assert_eq!(frame.orientation[0], 16384);
        assert_eq!(frame.accelerometer[0], 2048);
        assert_eq!(frame.gyroscope[0], 16);
    }

    #[test]
    fn test_dispatcher_known_sources() {
        let dispatcher = Dispatcher::new();

        assert_eq!(
            dispatcher.decode(SourceId::BATTERY, &[93]).unwrap(),
            Event::Battery(93)
        );
        assert_eq!(
            dispatcher
                .decode(SourceId::CLASSIFIER, &[4, 0, 0, 0, 0, 0])
                .unwrap(),
            Event::Classifier(ClassifierEvent::Unlocked)
        );

        for (index, source) in SourceId::RAW_EMG.into_iter().enumerate() {
            let event = dispatcher.decode(source, &[0u8; 16]).unwrap();
            match event {
                Event::RawEmg(frame) => assert_eq!(frame.source, index as u8),
                other => panic!("expected raw EMG event, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_dispatcher_unknown_source_is_data() {
        let dispatcher = Dispatcher::new();
        let event = dispatcher.decode(SourceId(0x104), &[1, 2, 3]).unwrap();
        assert_eq!(
            event,
            Event::UnknownSource {
                source: SourceId(0x104),
                data: vec![1, 2, 3],
            }
        );
    }

    #[test]
    fn test_dispatcher_malformed_known_source() {
        let dispatcher = Dispatcher::new();
        let err = dispatcher.decode(SourceId::IMU, &[0u8; 19]).unwrap_err();
        assert_eq!(err, ProtocolError::malformed("IMU", 20, 19));
    }
}
