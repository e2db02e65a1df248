//! Byte-order encoding for register values.
//!
//! Every width has an explicit big-endian or little-endian form; nothing
//! here depends on host byte order. Little-endian 16-bit forms are defined
//! as the byte swap of the big-endian form.

/// Decode a big-endian unsigned 16-bit value.
pub fn decode_u16_be(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

/// Decode a little-endian unsigned 16-bit value.
pub fn decode_u16_le(bytes: [u8; 2]) -> u16 {
    decode_u16_be(bytes).swap_bytes()
}

/// Decode a big-endian two's-complement 16-bit value.
pub fn decode_i16_be(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes)
}

/// Decode a little-endian two's-complement 16-bit value.
pub fn decode_i16_le(bytes: [u8; 2]) -> i16 {
    decode_i16_be(bytes).swap_bytes()
}

/// Decode a big-endian unsigned 32-bit value.
pub fn decode_u32_be(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

pub fn encode_u16_be(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

pub fn encode_u16_le(value: u16) -> [u8; 2] {
    encode_u16_be(value.swap_bytes())
}

pub fn encode_i16_be(value: i16) -> [u8; 2] {
    value.to_be_bytes()
}

pub fn encode_i16_le(value: i16) -> [u8; 2] {
    encode_i16_be(value.swap_bytes())
}

/// Encode bits 23..0 of `value` big-endian. Bits 31..24 are ignored.
pub fn encode_u24_be(value: u32) -> [u8; 3] {
    let [_, hi, mid, lo] = value.to_be_bytes();
    [hi, mid, lo]
}

pub fn encode_u32_be(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Build a register write frame: the register address, then `payload`.
pub fn register_frame(register: u8, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(payload.len() + 1);
    frame.push(register);
    frame.extend_from_slice(payload);
    frame
}
