//! Utility functions and helpers.
//!
//! - [`paths`]: user path expansion and normalization
//! - [`serialization`]: bincode encoding with optional zstd compression

/// Path manipulation and resolution utilities
pub mod paths;
/// Binary serialization utilities
pub mod serialization;

pub use paths::{expand_tilde, normalize_root};

/// Returns `"s"` unless `count` is exactly one.
#[must_use]
pub const fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
