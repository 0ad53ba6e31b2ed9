//! Chained, C-compatible error messages
//!
//! [`AdbcError`] is laid out like the ADBC 1.0 `struct AdbcError` so a driver
//! can hand it straight across the C boundary. Each [`set_error`] call
//! prepends one line of context, so after unwinding through several layers
//! the caller sees:
//!
//! ```text
//! [libpq] outermost context
//! [libpq] ...
//! [libpq] innermost context
//! ```
//!
//! Invariant: `message` is non-null exactly when `release` is set. Releasing
//! is idempotent and leaves both cleared.

use std::borrow::Cow;
use std::collections::TryReserveError;
use std::ffi::{c_char, CStr, CString};
use std::fmt::{self, Display};
use std::ptr;

use tracing::{trace, warn};

/// Tag prepended to every line of context
pub const ERROR_PREFIX: &str = "[libpq] ";

/// Error object shared with ADBC callers
#[repr(C)]
pub struct AdbcError {
    message: *mut c_char,
    vendor_code: i32,
    sqlstate: [c_char; 5],
    release: Option<unsafe extern "C" fn(*mut AdbcError)>,
}

impl AdbcError {
    /// Empty error: no message, no release callback
    pub const fn new() -> Self {
        Self {
            message: ptr::null_mut(),
            vendor_code: 0,
            sqlstate: [0; 5],
            release: None,
        }
    }

    /// Borrow an error object handed over by a C caller
    ///
    /// Null maps to `None`, which every function here treats as "no sink".
    ///
    /// # Safety
    /// `ptr` must be null or point to a valid `AdbcError` that nothing else
    /// accesses for `'a`. A non-null `message` must be nul-terminated and
    /// owned by the object's `release` callback.
    pub unsafe fn from_raw_mut<'a>(ptr: *mut AdbcError) -> Option<&'a mut AdbcError> {
        unsafe { ptr.as_mut() }
    }

    /// Whether a message is currently held
    pub fn is_set(&self) -> bool {
        !self.message.is_null()
    }

    /// Whether a release callback is installed
    pub fn has_release(&self) -> bool {
        self.release.is_some()
    }

    /// The accumulated message, newest context first
    pub fn message(&self) -> Option<Cow<'_, str>> {
        self.message_cstr().map(CStr::to_string_lossy)
    }

    pub fn vendor_code(&self) -> i32 {
        self.vendor_code
    }

    pub fn sqlstate(&self) -> [c_char; 5] {
        self.sqlstate
    }

    fn message_cstr(&self) -> Option<&CStr> {
        if self.message.is_null() {
            return None;
        }
        // SAFETY: a non-null message is a nul-terminated string owned by this
        // object until `release` runs.
        Some(unsafe { CStr::from_ptr(self.message) })
    }

    /// Free the message through the installed callback and clear both fields
    pub fn release(&mut self) {
        if let Some(release) = self.release {
            // SAFETY: the callback was installed together with `message` and
            // is its matching deallocator.
            unsafe { release(self) };
        }
        self.message = ptr::null_mut();
        self.release = None;
    }
}

impl Default for AdbcError {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AdbcError {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for AdbcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdbcError")
            .field("message", &self.message())
            .field("vendor_code", &self.vendor_code)
            .field("has_release", &self.has_release())
            .finish()
    }
}

/// Release callback installed by [`set_error`]
///
/// Tolerates null and already-released objects.
///
/// # Safety
/// `error` must be null or point to a valid `AdbcError` whose non-null
/// `message` was produced by [`set_error`].
pub unsafe extern "C" fn release_error_callback(error: *mut AdbcError) {
    let Some(error) = (unsafe { error.as_mut() }) else {
        return;
    };
    if !error.message.is_null() {
        // SAFETY: messages installed with this callback come from
        // `CString::into_raw` and contain no interior nul.
        drop(unsafe { CString::from_raw(error.message) });
    }
    error.message = ptr::null_mut();
    error.release = None;
}

/// Free the message and clear the object; a no-op when already clear
pub fn release_error(error: &mut AdbcError) {
    error.release();
}

/// Anything that may or may not carry an error object
pub trait ErrorSink<'a> {
    fn into_sink(self) -> Option<&'a mut AdbcError>;
}

impl<'a> ErrorSink<'a> for &'a mut AdbcError {
    fn into_sink(self) -> Option<&'a mut AdbcError> {
        Some(self)
    }
}

impl<'a> ErrorSink<'a> for Option<&'a mut AdbcError> {
    fn into_sink(self) -> Option<&'a mut AdbcError> {
        self
    }
}

/// Prepend `"[libpq] <context>"` to the error's message
///
/// Without a sink this does nothing. If the combined message cannot be
/// allocated the previous message is kept and the new context is only logged.
pub fn set_error<'a>(error: impl ErrorSink<'a>, context: impl Display) {
    if let Err(e) = try_set_error(error, &context) {
        warn!(%context, "Dropping ADBC error context: {}", e);
    }
}

/// Fallible form of [`set_error`]
///
/// # Errors
/// Returns the allocator failure when the combined message buffer cannot be
/// reserved; the error object is left unchanged in that case.
pub fn try_set_error<'a>(
    error: impl ErrorSink<'a>,
    context: impl Display,
) -> Result<(), TryReserveError> {
    let Some(error) = error.into_sink() else {
        return Ok(());
    };

    let head = crate::string_builder!(ERROR_PREFIX, context);
    let previous = error.message_cstr().map(CStr::to_bytes);
    let len = head.len() + previous.map_or(0, |p| p.len() + 1);

    let mut buf: Vec<u8> = Vec::new();
    buf.try_reserve_exact(len + 1)?;
    buf.extend(head.bytes().filter(|&b| b != 0));
    if let Some(previous) = previous {
        buf.push(b'\n');
        buf.extend_from_slice(previous);
    }
    // SAFETY: nul bytes were filtered out of `head` and `previous` came from a
    // CStr, so `buf` has no interior nul. Capacity for the terminator is
    // already reserved.
    let message = unsafe { CString::from_vec_unchecked(buf) };

    error.release();
    error.message = message.into_raw();
    error.release = Some(release_error_callback);

    trace!(context = %head, "ADBC error context added");
    Ok(())
}

/// Format the arguments with [`string_builder!`](crate::string_builder) and
/// prepend them to the error
///
/// ```
/// use pq_errors::{set_error, AdbcError};
///
/// let mut error = AdbcError::new();
/// set_error!(&mut error, "inner ", 1);
/// set_error!(&mut error, "outer");
/// assert_eq!(error.message().as_deref(), Some("[libpq] outer\n[libpq] inner 1"));
/// ```
#[macro_export]
macro_rules! set_error {
    ($error:expr $(, $part:expr)* $(,)?) => {
        $crate::set_error($error, $crate::string_builder!($($part),*))
    };
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_new_is_clear() {
        let error = AdbcError::new();
        assert!(!error.is_set());
        assert!(!error.has_release());
        assert_eq!(error.message(), None);
        assert_eq!(error.vendor_code(), 0);
        assert_eq!(error.sqlstate(), [0; 5]);
    }

    #[test]
    fn test_single_message_prefixed() {
        let mut error = AdbcError::new();
        set_error(&mut error, "connection refused");
        assert_eq!(
            error.message().as_deref(),
            Some("[libpq] connection refused")
        );
        assert!(error.has_release());
    }

    #[test]
    fn test_accumulation_newest_first() {
        let mut error = AdbcError::new();
        set_error(&mut error, "inner");
        set_error(&mut error, "outer");
        assert_eq!(
            error.message().as_deref(),
            Some("[libpq] outer\n[libpq] inner")
        );
    }

    #[test]
    fn test_release_twice() {
        let mut error = AdbcError::new();
        set_error(&mut error, "boom");
        error.release();
        assert!(!error.is_set());
        assert!(!error.has_release());
        error.release();
        release_error(&mut error);
        assert!(!error.is_set());
        assert!(!error.has_release());
    }

    #[test]
    fn test_release_callback_via_pointer() {
        let mut error = AdbcError::new();
        set_error(&mut error, "boom");
        unsafe {
            release_error_callback(&mut error);
            release_error_callback(&mut error);
            release_error_callback(ptr::null_mut());
        }
        assert!(!error.is_set());
    }

    #[test]
    fn test_null_sink_is_noop() {
        set_error(None::<&mut AdbcError>, "ignored");
        assert_eq!(try_set_error(None::<&mut AdbcError>, "ignored"), Ok(()));
        let sink = unsafe { AdbcError::from_raw_mut(ptr::null_mut()) };
        set_error(sink, "ignored");
    }

    #[test]
    fn test_interior_nul_removed() {
        let mut error = AdbcError::new();
        set_error(&mut error, "bad\0byte");
        assert_eq!(error.message().as_deref(), Some("[libpq] badbyte"));
    }

    #[test]
    fn test_reuse_after_release() {
        let mut error = AdbcError::new();
        set_error(&mut error, "first");
        error.release();
        set_error(&mut error, "second");
        assert_eq!(error.message().as_deref(), Some("[libpq] second"));
    }

    #[test]
    fn test_try_set_error_matches_set_error() {
        let mut a = AdbcError::new();
        let mut b = AdbcError::new();
        set_error(&mut a, "x");
        assert_eq!(try_set_error(&mut b, "x"), Ok(()));
        assert_eq!(a.message(), b.message());
    }

    #[test]
    fn test_foreign_release_is_called() {
        unsafe extern "C" fn foreign_release(error: *mut AdbcError) {
            if let Some(error) = unsafe { error.as_mut() } {
                drop(unsafe { CString::from_raw(error.message) });
                error.message = ptr::null_mut();
                error.release = None;
                error.vendor_code = 42;
            }
        }

        let mut error = AdbcError::new();
        error.message = CString::new("from C").unwrap().into_raw();
        error.release = Some(foreign_release);

        set_error(&mut error, "wrapped");
        assert_eq!(
            error.message().as_deref(),
            Some("[libpq] wrapped\nfrom C")
        );
        assert_eq!(error.vendor_code(), 42);
    }

    #[test]
    #[traced_test]
    fn test_context_is_traced() {
        let mut error = AdbcError::new();
        set_error(&mut error, "traced context");
        assert!(logs_contain("ADBC error context added"));
    }
}
