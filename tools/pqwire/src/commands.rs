//! Command implementations
//!
//! Each command builds a serializable report; `print_report` renders it as
//! coloured text or JSON.

use anyhow::Result;
use clap::ValueEnum;
use colored::*;
use pq_bytes::{
    swap_host_to_network_u16, swap_host_to_network_u32, swap_host_to_network_u64,
    swap_u64_portable,
};
use pq_errors::{check_na_adbc, set_error, AdbcError, AdbcStatusCode};
use serde::Serialize;
use tracing::debug;

use crate::codec::{self, WireType, WireValue};

/// Rendering options resolved from CLI flags and configuration
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub uppercase_hex: bool,
}

/// Integer widths accepted by `swap`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SwapWidth {
    #[value(name = "16")]
    W16,
    #[value(name = "32")]
    W32,
    #[value(name = "64")]
    W64,
}

#[derive(Debug, Serialize)]
pub struct EncodeReport {
    pub r#type: WireType,
    pub value: String,
    pub hex: String,
}

#[derive(Debug, Serialize)]
pub struct DecodeReport {
    pub r#type: WireType,
    pub offset: usize,
    pub value: WireValue,
}

#[derive(Debug, Serialize)]
pub struct SwapReport {
    pub width: u8,
    pub input: String,
    pub network: String,
    /// Mask-and-shift reversal, 64-bit only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portable_reversal: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrnoReport {
    pub errno: i32,
    pub status: String,
    pub status_code: u8,
    pub message: Option<String>,
}

pub fn encode(ty: WireType, value: &str, opts: OutputOptions) -> Result<EncodeReport> {
    let bytes = codec::encode(ty, value)?;
    Ok(EncodeReport {
        r#type: ty,
        value: value.trim().to_string(),
        hex: codec::format_hex(&bytes, opts.uppercase_hex),
    })
}

pub fn decode(ty: WireType, hex: &str, offset: usize) -> Result<DecodeReport> {
    let bytes = codec::parse_hex(hex)?;
    let value = codec::decode(ty, &bytes, offset)?;
    Ok(DecodeReport {
        r#type: ty,
        offset,
        value,
    })
}

fn parse_u64(text: &str) -> Result<u64> {
    let text = text.trim();
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse::<u64>(),
    };
    parsed.map_err(|e| anyhow::anyhow!("Invalid integer '{}': {}", text, e))
}

pub fn swap(width: SwapWidth, value: &str) -> Result<SwapReport> {
    let raw = parse_u64(value)?;
    let report = match width {
        SwapWidth::W16 => {
            let v = u16::try_from(raw)
                .map_err(|_| anyhow::anyhow!("{} does not fit in 16 bits", raw))?;
            SwapReport {
                width: 16,
                input: format!("0x{:04X}", v),
                network: format!("0x{:04X}", swap_host_to_network_u16(v)),
                portable_reversal: None,
            }
        },
        SwapWidth::W32 => {
            let v = u32::try_from(raw)
                .map_err(|_| anyhow::anyhow!("{} does not fit in 32 bits", raw))?;
            SwapReport {
                width: 32,
                input: format!("0x{:08X}", v),
                network: format!("0x{:08X}", swap_host_to_network_u32(v)),
                portable_reversal: None,
            }
        },
        SwapWidth::W64 => SwapReport {
            width: 64,
            input: format!("0x{:016X}", raw),
            network: format!("0x{:016X}", swap_host_to_network_u64(raw)),
            portable_reversal: Some(format!("0x{:016X}", swap_u64_portable(raw))),
        },
    };
    Ok(report)
}

// ============================================================================
// Errno demonstration: a two-layer driver call chain
// ============================================================================

fn close_socket(errno: i32) -> i32 {
    errno
}

fn release_socket(errno: i32, mut error: Option<&mut AdbcError>) -> AdbcStatusCode {
    check_na_adbc!(close_socket(errno), error.as_deref_mut());
    AdbcStatusCode::Ok
}

fn connection_release(errno: i32, mut error: Option<&mut AdbcError>) -> AdbcStatusCode {
    let status = release_socket(errno, error.as_deref_mut());
    if !status.is_ok() {
        set_error!(error, "AdbcConnectionRelease: failed to close connection");
    }
    status
}

/// Run the simulated call chain with `errno` as the system call result
pub fn simulate_errno(errno: i32) -> ErrnoReport {
    let mut error = AdbcError::new();
    let status = connection_release(errno, Some(&mut error));
    let message = error.message().map(|m| m.into_owned());
    error.release();
    debug!("Simulated errno {} -> {}", errno, status);

    ErrnoReport {
        errno,
        status: status.to_string(),
        status_code: status.into(),
        message,
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Human-readable form of a report
pub trait TextReport {
    fn render_text(&self) -> String;
}

impl TextReport for EncodeReport {
    fn render_text(&self) -> String {
        format!(
            "{} {} -> {}",
            format!("{:?}", self.r#type).to_lowercase().bright_cyan(),
            self.value,
            self.hex.bold()
        )
    }
}

impl TextReport for DecodeReport {
    fn render_text(&self) -> String {
        format!(
            "{} @{} -> {}",
            format!("{:?}", self.r#type).to_lowercase().bright_cyan(),
            self.offset,
            self.value.to_string().bold()
        )
    }
}

impl TextReport for SwapReport {
    fn render_text(&self) -> String {
        let mut out = format!(
            "{}-bit {} -> {}",
            self.width,
            self.input,
            self.network.bold()
        );
        if let Some(portable) = &self.portable_reversal {
            out.push_str(&format!("\n{} {}", "portable reversal:".dimmed(), portable));
        }
        out
    }
}

impl TextReport for ErrnoReport {
    fn render_text(&self) -> String {
        let status = if self.status_code == 0 {
            self.status.green()
        } else {
            self.status.red()
        };
        let mut out = format!("errno {} -> {} ({})", self.errno, status, self.status_code);
        if let Some(message) = &self.message {
            out.push('\n');
            out.push_str(message);
        }
        out
    }
}

pub fn print_report<R: Serialize + TextReport>(report: &R, opts: OutputOptions) -> Result<()> {
    if opts.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.render_text());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    const OPTS: OutputOptions = OutputOptions {
        json: false,
        uppercase_hex: true,
    };

    #[test]
    fn test_encode_report() {
        let report = encode(WireType::Int2, " -2 ", OPTS).unwrap();
        assert_eq!(report.hex, "FFFE");
        assert_eq!(report.value, "-2");
    }

    #[test]
    fn test_decode_report_json() {
        let report = decode(WireType::Int4, "ff 00 00 00 2a", 1).unwrap();
        assert_eq!(report.value, WireValue::I32(42));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["type"], "int4");
        assert_eq!(json["value"], 42);
    }

    #[test]
    fn test_swap_reports() {
        let report = swap(SwapWidth::W64, "0x0102030405060708").unwrap();
        assert_eq!(report.portable_reversal.as_deref(), Some("0x0807060504030201"));
        if cfg!(target_endian = "little") {
            assert_eq!(report.network, "0x0807060504030201");
            assert_eq!(swap(SwapWidth::W16, "258").unwrap().network, "0x0201");
        }
        assert!(swap(SwapWidth::W16, "70000").is_err());
        assert!(swap(SwapWidth::W32, "0xZZ").is_err());
    }

    #[test]
    fn test_errno_chain() {
        let report = simulate_errno(2);
        assert_eq!(report.status, "INTERNAL");
        assert_eq!(report.status_code, 9);
        let message = report.message.unwrap();
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(
            lines[0],
            "[libpq] AdbcConnectionRelease: failed to close connection"
        );
        assert!(lines[1].starts_with("[libpq] close_socket(errno) failed: "));
    }

    #[test]
    fn test_errno_success() {
        let report = simulate_errno(0);
        assert_eq!(report.status, "OK");
        assert_eq!(report.message, None);
    }

    #[test]
    fn test_render_text_contains_values() {
        colored::control::set_override(false);
        let text = simulate_errno(0).render_text();
        assert_eq!(text, "errno 0 -> OK (0)");
    }
}
