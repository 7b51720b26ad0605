/// Fraction of an overlay clip's duration spent ramping in, and again out.
const RAMP_SHARE: f64 = 0.1;

/// Fade weight of an overlay clip at normalized progress `p` through its extent.
///
/// Piecewise-linear envelope, uniform for every overlay clip: 0 to 1 over
/// `p in [0, 0.1]`, 1 over `[0.1, 0.9]`, 1 back to 0 over `[0.9, 1.0]`. Input outside
/// `[0, 1]` clamps, so the weight is always in `[0, 1]`.
pub fn overlay_fade_weight(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    if p < RAMP_SHARE {
        p / RAMP_SHARE
    } else if p <= 1.0 - RAMP_SHARE {
        1.0
    } else {
        (1.0 - p) / RAMP_SHARE
    }
}
