use std::collections::BTreeSet;

use crate::{
    foundation::error::{PlaylineError, PlaylineResult},
    foundation::time::MIN_TIMELINE_SECS,
    timeline::model::{Clip, ClipId, TrackId},
};

/// Ordered collection of placed clips, exclusively owned by one editor session.
///
/// Clips are kept in insertion order; the serialized form doubles as the CLI
/// timeline document. The timeline duration is derived on demand, never
/// stored.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ClipStore {
    clips: Vec<Clip>,
}

impl ClipStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clip, returning its id.
    pub fn append(&mut self, clip: Clip) -> ClipId {
        let id = clip.id;
        self.clips.push(clip);
        id
    }

    /// Remove a clip by id.
    ///
    /// Unknown ids are a benign no-op returning `false`; UI delete actions can
    /// race with re-renders, so double deletion must stay silent.
    pub fn remove(&mut self, id: ClipId) -> bool {
        let before = self.clips.len();
        self.clips.retain(|c| c.id != id);
        self.clips.len() != before
    }

    /// All clips in insertion order.
    pub fn list(&self) -> &[Clip] {
        &self.clips
    }

    /// Look up a clip by id.
    pub fn get(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Number of placed clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Return `true` when no clips are placed.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Drop every clip.
    pub fn clear(&mut self) {
        self.clips.clear();
    }

    /// Rightmost extent of one track in seconds; 0 when the track is empty.
    pub fn track_end_secs(&self, track: TrackId) -> f64 {
        self.clips
            .iter()
            .filter(|c| c.track == track)
            .map(|c| c.span.end_secs())
            .fold(0.0, f64::max)
    }

    /// Derived timeline duration: the rightmost extent over all clips, with a
    /// floor of [`MIN_TIMELINE_SECS`] so empty/short timelines stay scrubbable.
    pub fn timeline_duration_secs(&self) -> f64 {
        self.clips
            .iter()
            .map(|c| c.span.end_secs())
            .fold(MIN_TIMELINE_SECS, f64::max)
    }

    /// Parse a timeline document, checking model invariants on the way in.
    pub fn from_json(s: &str) -> PlaylineResult<Self> {
        let store: Self = serde_json::from_str(s)
            .map_err(|e| PlaylineError::serde(format!("timeline document: {e}")))?;
        store.validate()?;
        Ok(store)
    }

    /// Serialize as a timeline document.
    pub fn to_json_pretty(&self) -> PlaylineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlaylineError::serde(format!("timeline document: {e}")))
    }

    /// Check store invariants: each clip validates and no id repeats.
    pub fn validate(&self) -> PlaylineResult<()> {
        let mut seen = BTreeSet::new();
        for clip in &self.clips {
            clip.validate()?;
            if !seen.insert(clip.id) {
                return Err(PlaylineError::validation(format!(
                    "duplicate clip id '{}'",
                    clip.id
                )));
            }
        }
        Ok(())
    }
}
