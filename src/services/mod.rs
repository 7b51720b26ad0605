//! External collaborator boundaries: generation, entitlements, asset storage.
//!
//! Each boundary is a trait plus an in-crate implementation good enough for
//! tests and offline use; real backends live outside the crate.

pub mod assets;
pub mod entitlement;
pub mod generate;
