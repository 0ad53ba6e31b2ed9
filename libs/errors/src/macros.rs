//! Early-return macros for status-code call chains
//!
//! | Macro | Checks | On failure returns |
//! |-------|--------|--------------------|
//! | [`check!`](crate::check) | `AdbcStatusCode` | the same status |
//! | [`check_na_adbc!`](crate::check_na_adbc) | errno-style `i32` | `AdbcStatusCode::Internal`, after recording the expression and `strerror` text |
//! | [`check_na!`](crate::check_na) | errno-style `i32` | the same code, error object untouched |
//!
//! Bindings inside `macro_rules!` are hygienic, so any number of these can be
//! used, or nested, in one block.

/// Return the status from the enclosing function unless it is `Ok`
///
/// ```
/// use pq_errors::{check, AdbcStatusCode};
///
/// fn step(status: AdbcStatusCode) -> AdbcStatusCode {
///     status
/// }
///
/// fn run(reached: &mut bool) -> AdbcStatusCode {
///     check!(step(AdbcStatusCode::Ok));
///     check!(step(AdbcStatusCode::Io));
///     *reached = true;
///     AdbcStatusCode::Ok
/// }
///
/// let mut reached = false;
/// assert_eq!(run(&mut reached), AdbcStatusCode::Io);
/// assert!(!reached);
/// ```
#[macro_export]
macro_rules! check {
    ($expr:expr $(,)?) => {
        match $expr {
            $crate::AdbcStatusCode::Ok => {},
            status => {
                $crate::__private::tracing::debug!(
                    %status,
                    expr = stringify!($expr),
                    "Status check failed"
                );
                return status;
            },
        }
    };
}

/// Check an errno-style code and return an ADBC status if necessary
///
/// On a non-zero code the error object receives
/// `"<expr> failed: <strerror text>"` and the enclosing function returns
/// `AdbcStatusCode::Internal`.
#[macro_export]
macro_rules! check_na_adbc {
    ($expr:expr, $error:expr $(,)?) => {{
        let code: i32 = $expr;
        if code != 0 {
            $crate::__private::tracing::debug!(
                errno = code,
                expr = stringify!($expr),
                "Errno check failed"
            );
            $crate::set_error!(
                $error,
                stringify!($expr),
                " failed: ",
                $crate::errno_description(code)
            );
            return $crate::AdbcStatusCode::Internal;
        }
    }};
}

/// Check an errno-style code and return it if necessary
#[macro_export]
macro_rules! check_na {
    ($expr:expr $(,)?) => {{
        let code: i32 = $expr;
        if code != 0 {
            $crate::__private::tracing::debug!(
                errno = code,
                expr = stringify!($expr),
                "Errno check failed"
            );
            return code;
        }
    }};
}
