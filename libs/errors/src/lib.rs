//! Status codes and error chaining for the PostgreSQL ADBC driver
//!
//! Driver entry points report failure in two channels:
//!
//! - an [`AdbcStatusCode`] returned directly, propagated unchanged with
//!   [`check!`];
//! - an optional [`AdbcError`] that collects human-readable context, one
//!   `[libpq] ` prefixed line per layer, newest first.
//!
//! Errno-style system results are folded into the same scheme by
//! [`check_na_adbc!`] (record and return `INTERNAL`) and [`check_na!`]
//! (return the code as-is).

pub mod adbc_error;
pub mod errno;
pub mod macros;
pub mod status;
pub mod string_builder;

pub use adbc_error::{
    release_error, release_error_callback, set_error, try_set_error, AdbcError, ErrorSink,
    ERROR_PREFIX,
};
pub use errno::errno_description;
pub use status::{AdbcStatusCode, StatusError};
pub use string_builder::build_string;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
