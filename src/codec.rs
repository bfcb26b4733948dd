//! Extraction of 16-bit integers from raw sensor frames.
//!
//! Every function reads the first two bytes of `buf`.
//!
//! # Panics
//!
//! All functions panic if `buf` holds fewer than two bytes.

/// Reads a signed big-endian 16-bit integer.
pub fn get_s16_be(buf: &[u8]) -> i16 {
    get_u16_be(buf) as i16
}

/// Reads a signed little-endian 16-bit integer.
pub fn get_s16_le(buf: &[u8]) -> i16 {
    get_s16_be(buf).swap_bytes()
}

/// Reads an unsigned big-endian 16-bit integer.
pub fn get_u16_be(buf: &[u8]) -> u16 {
    ((buf[0] as u16) << 8) | buf[1] as u16
}

/// Reads an unsigned little-endian 16-bit integer.
pub fn get_u16_le(buf: &[u8]) -> u16 {
    get_u16_be(buf).swap_bytes()
}
