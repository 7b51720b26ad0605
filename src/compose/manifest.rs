use crate::{
    eval::resolver::Resolver,
    timeline::model::{Clip, TrackId},
    timeline::store::ClipStore,
};

/// One overlay contribution within a composed frame.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct OverlaySlot {
    /// The overlay clip.
    pub clip: Clip,
    /// Fade envelope weight in `[0, 1]` at the composed instant.
    pub fade_weight: f64,
}

/// Fully-resolved output for a single instant of playback.
///
/// The manifest owns clones of the resolved clips so it can outlive store
/// edits and serialize as a standalone document.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FrameManifest {
    /// Instant the manifest was composed for, in timeline seconds.
    pub time_secs: f64,
    /// Main-track visual, if one is active.
    pub main: Option<Clip>,
    /// Active overlay contributions with their fade weights.
    pub overlays: Vec<OverlaySlot>,
    /// Active audio clips, drawn from every track.
    pub audio: Vec<Clip>,
}

impl FrameManifest {
    /// True when nothing resolves at this instant.
    pub fn is_blank(&self) -> bool {
        self.main.is_none() && self.overlays.is_empty() && self.audio.is_empty()
    }
}

/// Builds [`FrameManifest`]s from a store at an instant.
pub struct Compositor;

impl Compositor {
    /// Compose for the interactive preview.
    ///
    /// The overlay track is treated as exclusive here: at most one overlay
    /// contributes, resolved with the same last-appended tie-break as the
    /// main track.
    #[tracing::instrument(skip(store))]
    pub fn compose_live(store: &ClipStore, t: f64) -> FrameManifest {
        let overlays = Resolver::active_on(store, TrackId::OVERLAY, t)
            .map(|c| OverlaySlot {
                clip: c.clone(),
                fade_weight: Resolver::fade_weight_at(c, t),
            })
            .into_iter()
            .collect();
        FrameManifest {
            time_secs: t,
            main: Resolver::active_on(store, TrackId::MAIN, t).cloned(),
            overlays,
            audio: Resolver::active_audio(store, t).into_iter().cloned().collect(),
        }
    }

    /// Compose for offline sampling.
    ///
    /// Every active overlay contributes, each weighted by its own fade
    /// envelope, in insertion order.
    #[tracing::instrument(skip(store))]
    pub fn compose_sampled(store: &ClipStore, t: f64) -> FrameManifest {
        FrameManifest {
            time_secs: t,
            main: Resolver::active_on(store, TrackId::MAIN, t).cloned(),
            overlays: Resolver::active_overlays(store, t)
                .into_iter()
                .map(|(c, w)| OverlaySlot {
                    clip: c.clone(),
                    fade_weight: w,
                })
                .collect(),
            audio: Resolver::active_audio(store, t).into_iter().cloned().collect(),
        }
    }
}
