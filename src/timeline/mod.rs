//! Clip model, the session clip store, and the placement engine.

/// Clip, clip id, kind, and track types.
pub mod model;
/// Append-at-track-end placement.
pub mod place;
/// Insertion-ordered clip collection with derived duration.
pub mod store;
