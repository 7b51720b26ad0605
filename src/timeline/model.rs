use crate::{
    foundation::error::{PlaylineError, PlaylineResult},
    foundation::time::TimeSpan,
};

/// Opaque unique clip identifier, stable for the clip's lifetime.
///
/// Generated with UUID v4 entropy; uniqueness is a practical guarantee, not a
/// security boundary.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ClipId(uuid::Uuid);

impl ClipId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for ClipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Media kind of a placed clip.
///
/// Determines default track affinity (image clips default to the overlay
/// track) and render treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipKind {
    /// Primary visual content.
    Video,
    /// Overlay visual content.
    Image,
    /// Mixed (not switched) aural content.
    Audio,
}

impl ClipKind {
    /// Human-readable label, used for default display names.
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Image => "Image",
            Self::Audio => "Audio",
        }
    }
}

/// Timeline track identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TrackId(pub u32);

impl TrackId {
    /// Track 1, reserved for primary visual content.
    pub const MAIN: TrackId = TrackId(1);
    /// Track 2, reserved for overlay visual content.
    pub const OVERLAY: TrackId = TrackId(2);
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A placed unit of media on the timeline.
///
/// The clip references its media by locator only; the underlying artifact is
/// owned by the external asset/generation layer and outlives clip removal.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Clip {
    /// Unique within one session.
    pub id: ClipId,
    /// Media kind.
    pub kind: ClipKind,
    /// Locator of the underlying media resource.
    pub source: String,
    /// Track the clip occupies.
    pub track: TrackId,
    /// Time extent on the timeline.
    pub span: TimeSpan,
    /// Human-readable label; not semantically load-bearing.
    pub display_name: String,
}

impl Clip {
    /// Check model invariants (non-empty source, valid extent).
    ///
    /// Fields are public and the type deserializes from documents, so
    /// invariants are re-checked here rather than only at construction.
    pub fn validate(&self) -> PlaylineResult<()> {
        if self.source.trim().is_empty() {
            return Err(PlaylineError::validation(format!(
                "clip '{}' has an empty source locator",
                self.id
            )));
        }
        // Re-validates extents that may have bypassed TimeSpan::new.
        TimeSpan::new(self.span.start_secs, self.span.duration_secs).map_err(|_| {
            PlaylineError::validation(format!(
                "clip '{}' has an invalid extent (start {}, duration {})",
                self.id, self.span.start_secs, self.span.duration_secs
            ))
        })?;
        Ok(())
    }
}
