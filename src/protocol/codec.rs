// src/protocol/codec.rs
//! Little-endian packing and unpacking primitives
//!
//! Every Myo payload is a fixed-width little-endian struct; these helpers
//! are the only place raw byte indexing happens. All unpacking functions
//! fail with [`ProtocolError::MalformedPayload`] when the input length does
//! not exactly match the expected layout — never read out of bounds, never
//! silently truncate or pad.

use crate::error::{ProtocolError, ProtocolResult};

/// Check that `data` is exactly `expected` bytes long.
pub fn ensure_len(what: &'static str, expected: usize, data: &[u8]) -> ProtocolResult<()> {
    if data.len() != expected {
        return Err(ProtocolError::malformed(what, expected, data.len()));
    }
    Ok(())
}

/// Read an unsigned 16-bit little-endian value at `offset`.
///
/// `offset + 2` must be in bounds; callers validate total length first
/// via [`ensure_len`].
pub fn read_u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Read a signed 16-bit little-endian value at `offset`.
pub fn read_i16_le(data: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Read an unsigned 32-bit little-endian value at `offset`.
pub fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Reinterpret a byte as a signed 8-bit sample value.
pub fn read_i8(data: &[u8], offset: usize) -> i8 {
    data[offset] as i8
}

/// Append an unsigned 16-bit value to `out` in little-endian order.
pub fn write_u16_le(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Append a signed 16-bit value to `out` in little-endian order.
pub fn write_i16_le(out: &mut Vec<u8>, value: i16) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Append an unsigned 32-bit value to `out` in little-endian order.
pub fn write_u32_le(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Pack a command header and payload into one wire frame.
///
/// Wire layout: `[opcode:u8][payload_len:u8][payload...]`. The length byte
/// always equals the exact payload byte count.
pub fn pack_command(opcode: u8, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(2 + payload.len());
    frame.push(opcode);
    frame.push(payload.len() as u8);
    frame.extend_from_slice(payload);
    frame
}

/// Decode a slice of consecutive little-endian i16 values.
///
/// `data.len()` must be exactly `count * 2`; callers validate first.
pub fn read_i16_le_array<const N: usize>(data: &[u8], offset: usize) -> [i16; N] {
    let mut out = [0i16; N];
    for (i, value) in out.iter_mut().enumerate() {
        *value = read_i16_le(data, offset + i * 2);
    }
    out
}
