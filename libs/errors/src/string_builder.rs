//! Concatenate heterogeneous displayable values into one string

use std::fmt::{Display, Write};

/// Concatenate every fragment's `Display` output, in order
///
/// Example: `build_string(&[&"read ", &4, &" bytes"])` -> `"read 4 bytes"`
pub fn build_string(parts: &[&dyn Display]) -> String {
    let mut result = String::new();
    for part in parts {
        // Writing to String buffer is infallible
        let _ = write!(&mut result, "{}", part);
    }
    result
}

/// Macro form of [`build_string`] accepting any number of `Display` arguments
///
/// ```
/// use pq_errors::string_builder;
///
/// assert_eq!(string_builder!("oid ", 23, ", len ", 4), "oid 23, len 4");
/// assert_eq!(string_builder!(), "");
/// ```
#[macro_export]
macro_rules! string_builder {
    ($($part:expr),* $(,)?) => {
        $crate::build_string(&[$(&$part as &dyn ::std::fmt::Display),*])
    };
}
