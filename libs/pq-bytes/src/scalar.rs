//! Generic access to network-order scalars inside larger buffers
//!
//! [`NetworkScalar`] ties each wire scalar to its fixed-size byte array.
//! [`read_network`] and [`write_network`] add bounds checking on top of the
//! total array functions in [`crate::network`].

use crate::error::{CodecError, Result};
use crate::network::{
    load_network_f32, load_network_f64, load_network_i16, load_network_i32, load_network_i64,
    load_network_u16, load_network_u32, load_network_u64, store_network_f32, store_network_f64,
    store_network_i16, store_network_i32, store_network_i64, store_network_u16,
    store_network_u32, store_network_u64,
};
use std::ops::Range;

/// A fixed-width value with a big-endian wire representation
pub trait NetworkScalar: Copy {
    /// Encoded size in bytes
    const WIDTH: usize;

    /// `[u8; WIDTH]`
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default + Copy;

    fn from_network_bytes(bytes: &Self::Bytes) -> Self;

    fn to_network_bytes(self) -> Self::Bytes;
}

macro_rules! impl_network_scalar {
    ($ty:ty, $width:literal, $load:ident, $store:ident) => {
        impl NetworkScalar for $ty {
            const WIDTH: usize = $width;
            type Bytes = [u8; $width];

            #[inline]
            fn from_network_bytes(bytes: &Self::Bytes) -> Self {
                $load(bytes)
            }

            #[inline]
            fn to_network_bytes(self) -> Self::Bytes {
                let mut bytes = [0u8; $width];
                $store(&mut bytes, self);
                bytes
            }
        }
    };
}

impl_network_scalar!(u16, 2, load_network_u16, store_network_u16);
impl_network_scalar!(i16, 2, load_network_i16, store_network_i16);
impl_network_scalar!(u32, 4, load_network_u32, store_network_u32);
impl_network_scalar!(i32, 4, load_network_i32, store_network_i32);
impl_network_scalar!(u64, 8, load_network_u64, store_network_u64);
impl_network_scalar!(i64, 8, load_network_i64, store_network_i64);
impl_network_scalar!(f32, 4, load_network_f32, store_network_f32);
impl_network_scalar!(f64, 8, load_network_f64, store_network_f64);

fn window(len: usize, offset: usize, width: usize) -> Result<Range<usize>> {
    let end = offset
        .checked_add(width)
        .ok_or(CodecError::OffsetOverflow { offset, width })?;
    if end > len {
        return Err(CodecError::buffer_too_short(
            width,
            offset,
            len.saturating_sub(offset),
        ));
    }
    Ok(offset..end)
}

/// Decode a `T` stored at `buf[offset..offset + T::WIDTH]`
///
/// # Errors
/// [`CodecError::BufferTooShort`] when fewer than `T::WIDTH` bytes follow
/// `offset`, [`CodecError::OffsetOverflow`] when the end index overflows.
pub fn read_network<T: NetworkScalar>(buf: &[u8], offset: usize) -> Result<T> {
    let range = window(buf.len(), offset, T::WIDTH)?;
    let mut bytes = T::Bytes::default();
    bytes.as_mut().copy_from_slice(&buf[range]);
    Ok(T::from_network_bytes(&bytes))
}

/// Encode `value` into `buf[offset..offset + T::WIDTH]`
///
/// The buffer is left untouched on error.
///
/// # Errors
/// Same conditions as [`read_network`].
pub fn write_network<T: NetworkScalar>(buf: &mut [u8], offset: usize, value: T) -> Result<()> {
    let range = window(buf.len(), offset, T::WIDTH)?;
    buf[range].copy_from_slice(value.to_network_bytes().as_ref());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_read_at_offset() {
        let buf = [0xAA, 0x00, 0x00, 0x01, 0x00, 0xBB];
        assert_eq!(read_network::<u32>(&buf, 1).unwrap(), 0x0000_0100);
        assert_eq!(read_network::<i16>(&buf, 4).unwrap(), 0x00BB);
    }

    #[test]
    fn test_read_exact_fit() {
        let buf = [0x12, 0x34];
        assert_eq!(read_network::<u16>(&buf, 0).unwrap(), 0x1234);
    }

    #[test]
    fn test_read_short_buffer() {
        let buf = [0u8; 5];
        assert_eq!(
            read_network::<u64>(&buf, 0),
            Err(CodecError::BufferTooShort {
                needed: 8,
                offset: 0,
                available: 5
            })
        );
        assert_eq!(
            read_network::<u32>(&buf, 9),
            Err(CodecError::BufferTooShort {
                needed: 4,
                offset: 9,
                available: 0
            })
        );
    }

    #[test]
    fn test_offset_overflow() {
        let buf = [0u8; 4];
        assert_eq!(
            read_network::<u16>(&buf, usize::MAX),
            Err(CodecError::OffsetOverflow {
                offset: usize::MAX,
                width: 2
            })
        );
    }

    #[test]
    fn test_write_at_offset() {
        let mut buf = [0u8; 10];
        write_network(&mut buf, 2, -1i32).unwrap();
        write_network(&mut buf, 6, 0x0102u16).unwrap();
        assert_eq!(buf, [0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x02, 0, 0]);
    }

    #[test]
    fn test_write_failure_leaves_buffer_untouched() {
        let mut buf = [0x55u8; 6];
        assert!(write_network(&mut buf, 0, 1.5f64).is_err());
        assert_eq!(buf, [0x55; 6]);
    }

    #[test]
    fn test_widths() {
        assert_eq!(<u16 as NetworkScalar>::WIDTH, 2);
        assert_eq!(<f32 as NetworkScalar>::WIDTH, 4);
        assert_eq!(<i64 as NetworkScalar>::WIDTH, 8);
    }
}
