//! Error type and time primitives shared by every layer.

/// Crate error enum and result alias.
pub mod error;
/// Seconds-domain time extents, rates, and formatting.
pub mod time;
