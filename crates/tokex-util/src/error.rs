//! The error-reporting contract shared across the workspace.
//!
//! Every error surfaced by a tokex crate carries two things: a stable,
//! machine-readable code string that callers can match on, and a
//! human-readable message provided through `Display`. Richer error
//! hierarchies (correlation ids, HTTP mappings, and so on) are the host
//! application's business; the core only promises this contract.

use std::error::Error;

/// An error carrying a stable machine-readable code.
///
/// The code identifies the error category and never changes between
/// releases, while the `Display` message is free-form and may be reworded.
///
/// # Example
///
/// ```
/// use std::fmt;
/// use tokex_util::CodedError;
///
/// #[derive(Debug)]
/// struct OutOfInk;
///
/// impl fmt::Display for OutOfInk {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "the printer is out of ink")
///     }
/// }
///
/// impl std::error::Error for OutOfInk {}
///
/// impl CodedError for OutOfInk {
///     fn code(&self) -> &'static str {
///         "OUT_OF_INK"
///     }
/// }
///
/// let err = OutOfInk;
/// assert_eq!(err.code(), "OUT_OF_INK");
/// ```
pub trait CodedError: Error {
    /// Returns the machine-readable code for this error.
    fn code(&self) -> &'static str;
}
