//! Instant evaluation: which clips are active at a time, and at what weight.

pub mod fade;
pub mod resolver;
