use crate::foundation::error::{PlaylineError, PlaylineResult};

/// Seconds added to the play-head per scheduled tick.
///
/// This is a constant nominal step (roughly 60 ticks per wall-clock second),
/// not a measured delta: playback rate is tied to the tick rate of the
/// cooperative scheduler driving the clock.
pub const TICK_STEP_SECS: f64 = 0.016;

/// Presentation floor for the derived timeline duration, in seconds.
///
/// An empty or very short timeline still reports this duration so scrubbing
/// and playback have a usable range.
pub const MIN_TIMELINE_SECS: f64 = 30.0;

/// Frames-per-second as a rational number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator, > 0.
    pub num: u32,
    /// Denominator, > 0.
    pub den: u32,
}

impl Fps {
    /// Create a validated rate with `num > 0` and `den > 0`.
    pub fn new(num: u32, den: u32) -> PlaylineResult<Self> {
        if den == 0 {
            return Err(PlaylineError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(PlaylineError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Rate as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Timeline time of frame `frames`, in seconds.
    ///
    /// Computed as a single division so exactly divisible frame counts land on
    /// exact second values (frame 150 at 30 fps is exactly 5.0).
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }
}

impl Default for Fps {
    /// The offline export default (30 fps).
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

/// Half-open time extent `[start, start + duration)` in timeline seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeSpan {
    /// Seconds from timeline origin where the extent begins. Non-negative.
    pub start_secs: f64,
    /// Extent length in seconds. Positive.
    pub duration_secs: f64,
}

impl TimeSpan {
    /// Create a validated extent with `start >= 0` and `duration > 0`, both finite.
    pub fn new(start_secs: f64, duration_secs: f64) -> PlaylineResult<Self> {
        if !start_secs.is_finite() || start_secs < 0.0 {
            return Err(PlaylineError::validation(
                "TimeSpan start must be finite and >= 0",
            ));
        }
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(PlaylineError::validation(
                "TimeSpan duration must be finite and > 0",
            ));
        }
        Ok(Self {
            start_secs,
            duration_secs,
        })
    }

    /// Exclusive end of the extent in seconds.
    pub fn end_secs(self) -> f64 {
        self.start_secs + self.duration_secs
    }

    /// Return `true` when `t` is inside `[start, end)`.
    ///
    /// The end instant is excluded so adjacent back-to-back extents never both
    /// claim the same instant.
    pub fn contains(self, t: f64) -> bool {
        self.start_secs <= t && t < self.end_secs()
    }

    /// Normalized progress of `t` through the extent (0 at start, 1 at end).
    ///
    /// Not clamped; callers decide how out-of-extent instants behave.
    pub fn progress(self, t: f64) -> f64 {
        (t - self.start_secs) / self.duration_secs
    }
}

/// Format a timeline instant as `m:ss.cc` for transport displays.
pub fn format_timecode(secs: f64) -> String {
    let secs = secs.max(0.0);
    let minutes = (secs / 60.0).floor() as u64;
    let whole_secs = (secs % 60.0).floor() as u64;
    let centis = ((secs % 1.0) * 100.0).floor() as u64;
    format!("{minutes}:{whole_secs:02}.{centis:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_span_contains_boundaries() {
        let s = TimeSpan::new(2.0, 3.0).unwrap();
        assert!(!s.contains(1.999));
        assert!(s.contains(2.0));
        assert!(s.contains(4.999));
        assert!(!s.contains(5.0));
    }

    #[test]
    fn time_span_rejects_bad_extents() {
        assert!(TimeSpan::new(-0.1, 5.0).is_err());
        assert!(TimeSpan::new(0.0, 0.0).is_err());
        assert!(TimeSpan::new(0.0, -2.0).is_err());
        assert!(TimeSpan::new(f64::NAN, 5.0).is_err());
        assert!(TimeSpan::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn fps_divisible_frames_land_on_exact_seconds() {
        let fps = Fps::new(30, 1).unwrap();
        assert_eq!(fps.frames_to_secs(150), 5.0);
        assert_eq!(fps.frames_to_secs(900), 30.0);
        assert_eq!(fps.frames_to_secs(0), 0.0);
    }

    #[test]
    fn fps_rejects_zero_terms() {
        assert!(Fps::new(30, 0).is_err());
        assert!(Fps::new(0, 1).is_err());
    }

    #[test]
    fn timecode_formats_minutes_seconds_centis() {
        assert_eq!(format_timecode(0.0), "0:00.00");
        assert_eq!(format_timecode(5.25), "0:05.25");
        assert_eq!(format_timecode(59.999), "0:59.99");
        assert_eq!(format_timecode(60.0), "1:00.00");
        assert_eq!(format_timecode(125.5), "2:05.50");
        assert_eq!(format_timecode(-3.0), "0:00.00");
    }
}
