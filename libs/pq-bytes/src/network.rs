//! Fixed-width scalar loads and stores in network byte order
//!
//! Loads copy the wire bytes into a local value before interpreting them, so
//! no alignment is assumed. Signed variants reinterpret the unsigned bit
//! pattern (`as` between same-width integers), never convert arithmetically.
//! Floats travel as opaque 32/64-bit patterns.
//!
//! The `to_network_*` functions return a host integer whose native-endian
//! bytes are the wire bytes, i.e. the value is ready to be written verbatim
//! with `to_ne_bytes`. The `store_network_*` functions do that write.

use crate::swap::{
    swap_host_to_network_u16, swap_host_to_network_u32, swap_host_to_network_u64,
    swap_network_to_host_u16, swap_network_to_host_u32, swap_network_to_host_u64,
};

// ============================================================================
// Loads
// ============================================================================

/// Read a network-order `u16`
#[inline]
pub fn load_network_u16(buf: &[u8; 2]) -> u16 {
    swap_network_to_host_u16(u16::from_ne_bytes(*buf))
}

/// Read a network-order `u32`
#[inline]
pub fn load_network_u32(buf: &[u8; 4]) -> u32 {
    swap_network_to_host_u32(u32::from_ne_bytes(*buf))
}

/// Read a network-order `u64`
#[inline]
pub fn load_network_u64(buf: &[u8; 8]) -> u64 {
    swap_network_to_host_u64(u64::from_ne_bytes(*buf))
}

/// Read a network-order `i16` (PostgreSQL `int2`)
#[inline]
pub fn load_network_i16(buf: &[u8; 2]) -> i16 {
    load_network_u16(buf) as i16
}

/// Read a network-order `i32` (PostgreSQL `int4`)
#[inline]
pub fn load_network_i32(buf: &[u8; 4]) -> i32 {
    load_network_u32(buf) as i32
}

/// Read a network-order `i64` (PostgreSQL `int8`)
#[inline]
pub fn load_network_i64(buf: &[u8; 8]) -> i64 {
    load_network_u64(buf) as i64
}

/// Read a network-order IEEE-754 single (PostgreSQL `float4`)
#[inline]
pub fn load_network_f32(buf: &[u8; 4]) -> f32 {
    f32::from_bits(swap_host_to_network_u32(u32::from_ne_bytes(*buf)))
}

/// Read a network-order IEEE-754 double (PostgreSQL `float8`)
///
/// The swap is self-inverse, so the host→network primitive serves for the
/// load as well.
#[inline]
pub fn load_network_f64(buf: &[u8; 8]) -> f64 {
    f64::from_bits(swap_host_to_network_u64(u64::from_ne_bytes(*buf)))
}

/// Alias of [`load_network_f64`] using the PostgreSQL type name
#[inline]
pub fn load_network_float8(buf: &[u8; 8]) -> f64 {
    load_network_f64(buf)
}

// ============================================================================
// Encodes (bit pattern ready for the wire)
// ============================================================================

/// Encode an `i16` as its network-order bit pattern
#[inline]
pub fn to_network_i16(v: i16) -> u16 {
    swap_host_to_network_u16(v as u16)
}

/// Encode an `i32` as its network-order bit pattern
#[inline]
pub fn to_network_i32(v: i32) -> u32 {
    swap_host_to_network_u32(v as u32)
}

/// Encode an `i64` as its network-order bit pattern
#[inline]
pub fn to_network_i64(v: i64) -> u64 {
    swap_host_to_network_u64(v as u64)
}

/// Encode an `f32` as its network-order bit pattern
#[inline]
pub fn to_network_f32(v: f32) -> u32 {
    swap_host_to_network_u32(v.to_bits())
}

/// Encode an `f64` as its network-order bit pattern
#[inline]
pub fn to_network_f64(v: f64) -> u64 {
    swap_host_to_network_u64(v.to_bits())
}

/// Alias of [`to_network_f64`] using the PostgreSQL type name
#[inline]
pub fn to_network_float8(v: f64) -> u64 {
    to_network_f64(v)
}

// ============================================================================
// Stores
// ============================================================================

/// Write a `u16` in network order
#[inline]
pub fn store_network_u16(buf: &mut [u8; 2], v: u16) {
    *buf = swap_host_to_network_u16(v).to_ne_bytes();
}

/// Write a `u32` in network order
#[inline]
pub fn store_network_u32(buf: &mut [u8; 4], v: u32) {
    *buf = swap_host_to_network_u32(v).to_ne_bytes();
}

/// Write a `u64` in network order
#[inline]
pub fn store_network_u64(buf: &mut [u8; 8], v: u64) {
    *buf = swap_host_to_network_u64(v).to_ne_bytes();
}

/// Write an `i16` in network order
#[inline]
pub fn store_network_i16(buf: &mut [u8; 2], v: i16) {
    *buf = to_network_i16(v).to_ne_bytes();
}

/// Write an `i32` in network order
#[inline]
pub fn store_network_i32(buf: &mut [u8; 4], v: i32) {
    *buf = to_network_i32(v).to_ne_bytes();
}

/// Write an `i64` in network order
#[inline]
pub fn store_network_i64(buf: &mut [u8; 8], v: i64) {
    *buf = to_network_i64(v).to_ne_bytes();
}

/// Write an `f32` in network order
#[inline]
pub fn store_network_f32(buf: &mut [u8; 4], v: f32) {
    *buf = to_network_f32(v).to_ne_bytes();
}

/// Write an `f64` in network order
#[inline]
pub fn store_network_f64(buf: &mut [u8; 8], v: f64) {
    *buf = to_network_f64(v).to_ne_bytes();
}
