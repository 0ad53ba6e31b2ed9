//! Textual descriptions of errno-style codes

/// Platform description of an errno value, as `strerror` would print it
///
/// Rust's `io::Error` appends `" (os error N)"`; that suffix is dropped so the
/// text reads the same as the C library's.
pub fn errno_description(code: i32) -> String {
    let text = std::io::Error::from_raw_os_error(code).to_string();
    match text.rfind(" (os error ") {
        Some(idx) => text[..idx].to_string(),
        None => text,
    }
}
