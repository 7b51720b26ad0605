use crate::{
    eval::fade::overlay_fade_weight,
    timeline::model::{Clip, ClipKind, TrackId},
    timeline::store::ClipStore,
};

/// Stateless queries resolving which clips occupy an instant.
///
/// Every query reads the store as passed, so a clip removed between ticks
/// simply stops resolving on the next query; nothing is cached by reference.
pub struct Resolver;

impl Resolver {
    /// The clip occupying an exclusive track at `t`, if any.
    ///
    /// Membership is `t in [start, start + duration)`. When manual overlap puts
    /// several candidates on one exclusive track, the most recently appended
    /// clip wins.
    pub fn active_on(store: &ClipStore, track: TrackId, t: f64) -> Option<&Clip> {
        store
            .list()
            .iter()
            .rev()
            .find(|c| c.track == track && c.span.contains(t))
    }

    /// Every overlay-track clip active at `t`, paired with its fade weight,
    /// in insertion order.
    pub fn active_overlays(store: &ClipStore, t: f64) -> Vec<(&Clip, f64)> {
        store
            .list()
            .iter()
            .filter(|c| c.track == TrackId::OVERLAY && c.span.contains(t))
            .map(|c| (c, overlay_fade_weight(c.span.progress(t))))
            .collect()
    }

    /// Every audio-kind clip active at `t`, regardless of track.
    ///
    /// Audio is mixed rather than switched, so the selection is not
    /// track-scoped and has no tie-break.
    pub fn active_audio(store: &ClipStore, t: f64) -> Vec<&Clip> {
        store
            .list()
            .iter()
            .filter(|c| c.kind == ClipKind::Audio && c.span.contains(t))
            .collect()
    }

    /// Fade weight of one clip at `t`; 0 outside its extent.
    pub fn fade_weight_at(clip: &Clip, t: f64) -> f64 {
        if !clip.span.contains(t) {
            return 0.0;
        }
        overlay_fade_weight(clip.span.progress(t))
    }
}
