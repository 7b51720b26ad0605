use crate::{
    foundation::error::{PlaylineError, PlaylineResult},
    foundation::time::TimeSpan,
    timeline::model::{Clip, ClipId, ClipKind, TrackId},
    timeline::store::ClipStore,
};

/// Production default clip length in seconds.
///
/// A policy constant, not derived from the media's intrinsic length; the
/// system never probes media duration.
pub const DEFAULT_CLIP_SECS: f64 = 5.0;

/// Input to a placement attempt.
#[derive(Clone, Debug)]
pub struct PlaceSpec {
    /// Media kind of the new clip.
    pub kind: ClipKind,
    /// Locator of the media resource.
    pub source: String,
    /// Explicit track; `None` infers from `kind`.
    pub track: Option<TrackId>,
    /// Explicit duration in seconds; `None` uses [`DEFAULT_CLIP_SECS`].
    pub duration_secs: Option<f64>,
    /// Explicit label; `None` uses the kind label.
    pub display_name: Option<String>,
}

impl PlaceSpec {
    /// Start a spec with the required fields.
    pub fn new(kind: ClipKind, source: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            track: None,
            duration_secs: None,
            display_name: None,
        }
    }

    /// Pin the clip to an explicit track.
    pub fn track(mut self, track: TrackId) -> Self {
        self.track = Some(track);
        self
    }

    /// Override the default duration.
    pub fn duration_secs(mut self, secs: f64) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    /// Override the default display name.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Default track for a clip kind: images overlay, everything else mainline.
pub fn infer_track(kind: ClipKind) -> TrackId {
    match kind {
        ClipKind::Image => TrackId::OVERLAY,
        ClipKind::Video | ClipKind::Audio => TrackId::MAIN,
    }
}

/// Append a new clip immediately after the rightmost extent of its track.
///
/// Only the target track is consulted for the start offset; clips on other
/// tracks are never interleaved or overlap-checked against. An empty track
/// places at 0. Invalid input is rejected before any store mutation.
pub fn place(store: &mut ClipStore, spec: PlaceSpec) -> PlaylineResult<Clip> {
    if spec.source.trim().is_empty() {
        return Err(PlaylineError::placement(
            "source locator must be non-empty",
        ));
    }
    let duration_secs = spec.duration_secs.unwrap_or(DEFAULT_CLIP_SECS);
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(PlaylineError::placement(format!(
            "duration must be finite and > 0, got {duration_secs}"
        )));
    }

    let track = spec.track.unwrap_or_else(|| infer_track(spec.kind));
    let start_secs = store.track_end_secs(track);

    let clip = Clip {
        id: ClipId::generate(),
        kind: spec.kind,
        source: spec.source,
        track,
        span: TimeSpan::new(start_secs, duration_secs)?,
        display_name: spec
            .display_name
            .unwrap_or_else(|| spec.kind.label().to_string()),
    };
    tracing::debug!(id = %clip.id, track = %clip.track, start_secs, "placed clip");

    let placed = clip.clone();
    store.append(clip);
    Ok(placed)
}
