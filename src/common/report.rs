//! Human-readable rendering of outcome codes for diagnostics.
//!
//! Nothing in the storage layer inspects these strings; they exist for
//! operators and tools.

use super::error::{ResultCode, StorageError};

/// Formats an outcome code with an optional detail message:
/// `EC (3) RC_WRITE_FAILED - "detail"`, or `EC (3) RC_WRITE_FAILED` without one.
pub fn error_message(code: ResultCode, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("EC ({}) {} - {:?}", code.as_i32(), code.name(), detail),
        None => format!("EC ({}) {}", code.as_i32(), code.name()),
    }
}

/// Formats a storage error, using its message as the detail
pub fn describe(err: &StorageError) -> String {
    error_message(err.code(), Some(&err.to_string()))
}

/// Prints the diagnostic line for an error to standard output
pub fn print_error(err: &StorageError) {
    println!("{}", describe(err));
}
