//! Text ⇄ wire conversions for the PostgreSQL scalar types

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use pq_bytes::{read_network, NetworkScalar};
use serde::Serialize;
use tracing::debug;

/// Scalar types understood by `encode` / `decode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WireType {
    /// 16-bit signed (int2)
    Int2,
    /// 32-bit signed (int4)
    Int4,
    /// 64-bit signed (int8)
    Int8,
    Uint2,
    Uint4,
    Uint8,
    /// IEEE-754 single (float4)
    Float4,
    /// IEEE-754 double (float8)
    Float8,
}

impl WireType {
    pub fn width(&self) -> usize {
        match self {
            Self::Int2 | Self::Uint2 => 2,
            Self::Int4 | Self::Uint4 | Self::Float4 => 4,
            Self::Int8 | Self::Uint8 | Self::Float8 => 8,
        }
    }
}

/// A decoded host value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireValue {
    I16(i16),
    I32(i32),
    I64(i64),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

fn parse_value<T>(ty: WireType, text: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.trim()
        .parse::<T>()
        .with_context(|| format!("Invalid {:?} value '{}'", ty, text))
}

fn encode_as<T>(ty: WireType, text: &str) -> Result<Vec<u8>>
where
    T: NetworkScalar + FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: T = parse_value(ty, text)?;
    Ok(value.to_network_bytes().as_ref().to_vec())
}

/// Encode a textual value as network-order bytes
pub fn encode(ty: WireType, text: &str) -> Result<Vec<u8>> {
    let bytes = match ty {
        WireType::Int2 => encode_as::<i16>(ty, text)?,
        WireType::Int4 => encode_as::<i32>(ty, text)?,
        WireType::Int8 => encode_as::<i64>(ty, text)?,
        WireType::Uint2 => encode_as::<u16>(ty, text)?,
        WireType::Uint4 => encode_as::<u32>(ty, text)?,
        WireType::Uint8 => encode_as::<u64>(ty, text)?,
        WireType::Float4 => encode_as::<f32>(ty, text)?,
        WireType::Float8 => encode_as::<f64>(ty, text)?,
    };
    debug!("Encoded {:?} '{}' -> {:02X?}", ty, text, bytes);
    Ok(bytes)
}

/// Decode the scalar at `offset`
pub fn decode(ty: WireType, buf: &[u8], offset: usize) -> Result<WireValue> {
    let value = match ty {
        WireType::Int2 => WireValue::I16(read_network(buf, offset)?),
        WireType::Int4 => WireValue::I32(read_network(buf, offset)?),
        WireType::Int8 => WireValue::I64(read_network(buf, offset)?),
        WireType::Uint2 => WireValue::U16(read_network(buf, offset)?),
        WireType::Uint4 => WireValue::U32(read_network(buf, offset)?),
        WireType::Uint8 => WireValue::U64(read_network(buf, offset)?),
        WireType::Float4 => WireValue::F32(read_network(buf, offset)?),
        WireType::Float8 => WireValue::F64(read_network(buf, offset)?),
    };
    debug!("Decoded {:?} at offset {} -> {}", ty, offset, value);
    Ok(value)
}

/// Parse hex input, tolerating a `0x` prefix and space/colon separators
///
/// Example: `"0x00 00:01 00"` -> `[0x00, 0x00, 0x01, 0x00]`
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    if digits.is_empty() {
        bail!("Empty hex input");
    }
    hex::decode(&digits).with_context(|| format!("Invalid hex input '{}'", text))
}

/// Render bytes as hex
pub fn format_hex(bytes: &[u8], uppercase: bool) -> String {
    if uppercase {
        hex::encode_upper(bytes)
    } else {
        hex::encode(bytes)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_encode_int4() {
        assert_eq!(encode(WireType::Int4, "16909060").unwrap(), [1, 2, 3, 4]);
        assert_eq!(encode(WireType::Int4, "-1").unwrap(), [0xFF; 4]);
    }

    #[test]
    fn test_encode_float8() {
        assert_eq!(
            encode(WireType::Float8, "1.0").unwrap(),
            [0x3F, 0xF0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        assert!(encode(WireType::Int2, "40000").is_err());
        assert!(encode(WireType::Uint4, "-1").is_err());
        assert!(encode(WireType::Float4, "abc").is_err());
    }

    #[test]
    fn test_decode_types() {
        let buf = [0xFF, 0xFE, 0x00, 0x00];
        assert_eq!(decode(WireType::Int2, &buf, 0).unwrap(), WireValue::I16(-2));
        assert_eq!(decode(WireType::Uint2, &buf, 0).unwrap(), WireValue::U16(0xFFFE));
        assert_eq!(decode(WireType::Uint2, &buf, 2).unwrap(), WireValue::U16(0));
        assert_eq!(
            decode(WireType::Float4, &[0x41, 0xC8, 0, 0], 0).unwrap(),
            WireValue::F32(25.0)
        );
    }

    #[test]
    fn test_decode_short_buffer() {
        let err = decode(WireType::Int8, &[0u8; 4], 0).unwrap_err();
        assert!(err.to_string().contains("Buffer too short"));
    }

    #[test]
    fn test_parse_hex_separators() {
        assert_eq!(parse_hex("0x00 00:01 00").unwrap(), [0, 0, 1, 0]);
        assert_eq!(parse_hex("DEADbeef").unwrap(), [0xDE, 0xAD, 0xBE, 0xEF]);
        assert!(parse_hex("").is_err());
        assert!(parse_hex("abc").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn test_format_hex_case() {
        assert_eq!(format_hex(&[0xAB, 0x01], true), "AB01");
        assert_eq!(format_hex(&[0xAB, 0x01], false), "ab01");
    }

    #[test]
    fn test_width() {
        assert_eq!(WireType::Int2.width(), 2);
        assert_eq!(WireType::Float4.width(), 4);
        assert_eq!(WireType::Uint8.width(), 8);
    }

    #[test]
    fn test_encode_decode_agree() {
        for (ty, text) in [
            (WireType::Int8, "-9223372036854775808"),
            (WireType::Uint8, "18446744073709551615"),
            (WireType::Float8, "-0.5"),
        ] {
            let bytes = encode(ty, text).unwrap();
            assert_eq!(bytes.len(), ty.width());
            assert_eq!(decode(ty, &bytes, 0).unwrap().to_string(), text);
        }
    }
}
