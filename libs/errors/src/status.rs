//! ADBC status codes
//!
//! The closed set of outcomes every driver entry point returns. Values match
//! the `ADBC_STATUS_*` constants so the enum can cross the C boundary as a
//! plain `u8`.

use std::fmt;
use thiserror::Error;

/// Outcome of a driver operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum AdbcStatusCode {
    /// No error
    #[default]
    Ok = 0,
    Unknown = 1,
    NotImplemented = 2,
    NotFound = 3,
    AlreadyExists = 4,
    InvalidArgument = 5,
    /// Precondition on the driver/connection/statement state not met
    InvalidState = 6,
    /// Data could not be converted or was malformed
    InvalidData = 7,
    /// Database integrity constraint violated
    Integrity = 8,
    /// Bug or system-level failure inside the driver
    Internal = 9,
    Io = 10,
    Cancelled = 11,
    Timeout = 12,
    Unauthenticated = 13,
    Unauthorized = 14,
}

/// Errors converting raw values into [`AdbcStatusCode`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("Unknown ADBC status code: {0}")]
    UnknownCode(u8),
}

impl AdbcStatusCode {
    /// `true` only for [`AdbcStatusCode::Ok`]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Name of the matching `ADBC_STATUS_*` constant
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Unknown => "UNKNOWN",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::InvalidState => "INVALID_STATE",
            Self::InvalidData => "INVALID_DATA",
            Self::Integrity => "INTEGRITY",
            Self::Internal => "INTERNAL",
            Self::Io => "IO",
            Self::Cancelled => "CANCELLED",
            Self::Timeout => "TIMEOUT",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Unauthorized => "UNAUTHORIZED",
        }
    }

    /// Bridge to `?`: `Ok` becomes `Ok(())`, anything else `Err(self)`
    pub fn into_result(self) -> Result<(), AdbcStatusCode> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for AdbcStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<AdbcStatusCode> for u8 {
    fn from(status: AdbcStatusCode) -> Self {
        status as u8
    }
}

impl TryFrom<u8> for AdbcStatusCode {
    type Error = StatusError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Ok,
            1 => Self::Unknown,
            2 => Self::NotImplemented,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidArgument,
            6 => Self::InvalidState,
            7 => Self::InvalidData,
            8 => Self::Integrity,
            9 => Self::Internal,
            10 => Self::Io,
            11 => Self::Cancelled,
            12 => Self::Timeout,
            13 => Self::Unauthenticated,
            14 => Self::Unauthorized,
            other => return Err(StatusError::UnknownCode(other)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_adbc_constants() {
        assert_eq!(u8::from(AdbcStatusCode::Ok), 0);
        assert_eq!(u8::from(AdbcStatusCode::InvalidData), 7);
        assert_eq!(u8::from(AdbcStatusCode::Internal), 9);
        assert_eq!(u8::from(AdbcStatusCode::Unauthorized), 14);
    }

    #[test]
    fn test_try_from_roundtrip() {
        for code in 0u8..=14 {
            let status = AdbcStatusCode::try_from(code);
            assert_eq!(status.map(u8::from), Ok(code));
        }
        assert_eq!(
            AdbcStatusCode::try_from(15),
            Err(StatusError::UnknownCode(15))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(AdbcStatusCode::Internal.to_string(), "INTERNAL");
        assert_eq!(AdbcStatusCode::NotImplemented.to_string(), "NOT_IMPLEMENTED");
    }

    #[test]
    fn test_into_result() {
        assert_eq!(AdbcStatusCode::Ok.into_result(), Ok(()));
        assert_eq!(
            AdbcStatusCode::Timeout.into_result(),
            Err(AdbcStatusCode::Timeout)
        );
        assert!(AdbcStatusCode::default().is_ok());
    }
}
