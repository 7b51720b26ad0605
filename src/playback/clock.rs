use crate::foundation::time::TICK_STEP_SECS;

/// Transport state of the logical clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Clock holds its position; ticks are ignored.
    #[default]
    Paused,
    /// Clock advances one fixed step per tick.
    Playing,
}

/// Result of advancing the clock by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clock was paused; nothing moved.
    Idle,
    /// Clock advanced by one step.
    Advanced,
    /// The step reached the timeline end: clock paused and rewound to zero.
    Completed,
}

/// Logical playback clock.
///
/// Time advances by a fixed [`TICK_STEP_SECS`] per tick rather than by
/// wall-clock elapsed time; identical tick sequences land on identical
/// positions. Playback rate is therefore tied to the driver's tick cadence.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PlaybackClock {
    current_secs: f64,
    state: PlaybackState,
}

impl PlaybackClock {
    /// A paused clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position in timeline seconds.
    pub fn current_secs(&self) -> f64 {
        self.current_secs
    }

    /// Current transport state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// True when the clock is playing.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Start advancing. Idempotent while already playing.
    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    /// Hold the current position. Idempotent while already paused.
    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    /// Flip between playing and paused.
    pub fn toggle(&mut self) {
        self.state = match self.state {
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Paused,
        };
    }

    /// Move to `t`, clamped into `[0, duration_secs]` without error.
    ///
    /// The transport state is untouched; seeking while playing keeps playing.
    pub fn seek(&mut self, t: f64, duration_secs: f64) {
        let t = if t.is_finite() { t } else { 0.0 };
        self.current_secs = t.clamp(0.0, duration_secs);
    }

    /// Advance one fixed step against the given timeline duration.
    ///
    /// A step that would land at or past the end completes playback: the
    /// clock pauses and rewinds to zero in the same transition, so the end
    /// instant itself is never observed as a position.
    pub fn tick(&mut self, duration_secs: f64) -> TickOutcome {
        if self.state != PlaybackState::Playing {
            return TickOutcome::Idle;
        }
        let next = self.current_secs + TICK_STEP_SECS;
        if next >= duration_secs {
            self.state = PlaybackState::Paused;
            self.current_secs = 0.0;
            TickOutcome::Completed
        } else {
            self.current_secs = next;
            TickOutcome::Advanced
        }
    }
}
