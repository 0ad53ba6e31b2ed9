//! Host ⇄ network byte-order swap primitives
//!
//! Network order is big-endian. On a big-endian host every function here is
//! the identity; on a little-endian host it reverses the bytes. Swapping is
//! self-inverse for a fixed width, so `swap_network_to_host_*` and
//! `swap_host_to_network_*` are interchangeable. Both names are kept so call
//! sites read in the direction the data is travelling.

/// Network → host for 16-bit values
#[inline]
pub const fn swap_network_to_host_u16(x: u16) -> u16 {
    u16::from_be(x)
}

/// Host → network for 16-bit values
#[inline]
pub const fn swap_host_to_network_u16(x: u16) -> u16 {
    x.to_be()
}

/// Network → host for 32-bit values
#[inline]
pub const fn swap_network_to_host_u32(x: u32) -> u32 {
    u32::from_be(x)
}

/// Host → network for 32-bit values
#[inline]
pub const fn swap_host_to_network_u32(x: u32) -> u32 {
    x.to_be()
}

/// Network → host for 64-bit values
#[inline]
pub const fn swap_network_to_host_u64(x: u64) -> u64 {
    u64::from_be(x)
}

/// Host → network for 64-bit values
#[inline]
pub const fn swap_host_to_network_u64(x: u64) -> u64 {
    x.to_be()
}

/// Unconditional 8-byte reversal spelled out as masks and shifts.
///
/// Kept for targets whose toolchains lack a 64-bit byte-swap primitive.
/// Equivalent to [`u64::swap_bytes`] for every input.
#[inline]
pub const fn swap_u64_portable(x: u64) -> u64 {
    ((x & 0x0000_0000_0000_00FF) << 56)
        | ((x & 0x0000_0000_0000_FF00) << 40)
        | ((x & 0x0000_0000_00FF_0000) << 24)
        | ((x & 0x0000_0000_FF00_0000) << 8)
        | ((x & 0x0000_00FF_0000_0000) >> 8)
        | ((x & 0x0000_FF00_0000_0000) >> 24)
        | ((x & 0x00FF_0000_0000_0000) >> 40)
        | ((x & 0xFF00_0000_0000_0000) >> 56)
}
