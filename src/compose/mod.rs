//! Frame composition: resolved-clip manifests and the offline export walk.

pub mod export;
pub mod manifest;
