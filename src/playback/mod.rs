//! Logical playback: the fixed-step clock and the cooperative tick driver.

pub mod clock;
pub mod driver;
