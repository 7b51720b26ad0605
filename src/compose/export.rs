use crate::{
    compose::manifest::{Compositor, FrameManifest},
    foundation::error::PlaylineResult,
    foundation::time::Fps,
    timeline::store::ClipStore,
};

/// Configuration provided to a [`ManifestSink`] at the start of an export walk.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Sampling rate of the walk.
    pub fps: Fps,
    /// Derived timeline duration being walked, in seconds.
    pub duration_secs: f64,
}

/// Sink contract for consuming composed frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing sample
/// index order, starting at 0.
pub trait ManifestSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> PlaylineResult<()>;
    /// Push one composed frame in strictly increasing timeline order.
    fn push_frame(&mut self, index: u64, manifest: &FrameManifest) -> PlaylineResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> PlaylineResult<()>;
}

/// In-memory sink for tests and inspection.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<FrameManifest>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[FrameManifest] {
        &self.frames
    }

    /// Consume the sink, keeping the captured frames.
    pub fn into_frames(self) -> Vec<FrameManifest> {
        self.frames
    }
}

impl ManifestSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PlaylineResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, _index: u64, manifest: &FrameManifest) -> PlaylineResult<()> {
        self.frames.push(manifest.clone());
        Ok(())
    }

    fn end(&mut self) -> PlaylineResult<()> {
        Ok(())
    }
}

/// Aggregated export counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Total samples pushed, blank frames included.
    pub samples_total: u64,
    /// Samples where a main-track visual was active.
    pub with_main: u64,
    /// Samples where at least one overlay was active.
    pub with_overlay: u64,
    /// Samples where at least one audio clip was active.
    pub with_audio: u64,
}

impl ExportStats {
    fn tally(&mut self, manifest: &FrameManifest) {
        self.samples_total += 1;
        if manifest.main.is_some() {
            self.with_main += 1;
        }
        if !manifest.overlays.is_empty() {
            self.with_overlay += 1;
        }
        if !manifest.audio.is_empty() {
            self.with_audio += 1;
        }
    }
}

/// Walk the whole derived timeline at a fixed sampling rate and push one
/// composed frame per sample into `sink`.
///
/// Samples sit at `i / fps` for `i = 0, 1, ...` and the walk stops at the
/// first sample at or past the derived duration, so the end instant itself is
/// never composed. A 5 second clip sampled at 30 fps is active in exactly 150
/// frames.
#[tracing::instrument(skip(store, sink))]
pub fn export_manifests(
    store: &ClipStore,
    fps: Fps,
    sink: &mut dyn ManifestSink,
) -> PlaylineResult<ExportStats> {
    store.validate()?;

    let duration_secs = store.timeline_duration_secs();
    sink.begin(SinkConfig { fps, duration_secs })?;

    let mut stats = ExportStats::default();
    for index in 0u64.. {
        let t = fps.frames_to_secs(index);
        if t >= duration_secs {
            break;
        }
        let manifest = Compositor::compose_sampled(store, t);
        stats.tally(&manifest);
        sink.push_frame(index, &manifest)?;
    }
    sink.end()?;

    tracing::debug!(
        samples = stats.samples_total,
        with_main = stats.with_main,
        "export walk finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        foundation::time::TimeSpan,
        timeline::model::{Clip, ClipId, ClipKind, TrackId},
    };

    fn clip(kind: ClipKind, track: TrackId, start: f64, duration: f64) -> Clip {
        Clip {
            id: ClipId::generate(),
            kind,
            source: "gen/a".to_string(),
            track,
            span: TimeSpan::new(start, duration).unwrap(),
            display_name: kind.label().to_string(),
        }
    }

    #[test]
    fn five_second_clip_is_active_in_exactly_150_samples() {
        let mut store = ClipStore::new();
        store.append(clip(ClipKind::Video, TrackId::MAIN, 0.0, 5.0));

        let fps = Fps::new(30, 1).unwrap();
        let mut sink = InMemorySink::new();
        let stats = export_manifests(&store, fps, &mut sink).unwrap();

        // 30 s floor at 30 fps.
        assert_eq!(stats.samples_total, 900);
        assert_eq!(stats.with_main, 150);
        assert_eq!(sink.frames().len(), 900);
    }

    #[test]
    fn empty_timeline_exports_floor_of_blanks() {
        let store = ClipStore::new();
        let mut sink = InMemorySink::new();
        let stats = export_manifests(&store, Fps::new(30, 1).unwrap(), &mut sink).unwrap();

        assert_eq!(stats.samples_total, 900);
        assert_eq!(stats.with_main, 0);
        assert!(sink.frames().iter().all(FrameManifest::is_blank));
    }

    #[test]
    fn samples_sit_on_the_frame_grid() {
        let store = ClipStore::new();
        let mut sink = InMemorySink::new();
        export_manifests(&store, Fps::new(30, 1).unwrap(), &mut sink).unwrap();

        assert_eq!(sink.frames()[0].time_secs, 0.0);
        assert_eq!(sink.frames()[30].time_secs, 1.0);
        let cfg = sink.config().unwrap();
        assert_eq!(cfg.duration_secs, 30.0);
    }

    #[test]
    fn overlay_and_audio_are_tallied_separately() {
        let mut store = ClipStore::new();
        store.append(clip(ClipKind::Image, TrackId::OVERLAY, 0.0, 5.0));
        store.append(clip(ClipKind::Audio, TrackId::MAIN, 0.0, 2.0));

        let mut sink = InMemorySink::new();
        let stats = export_manifests(&store, Fps::new(30, 1).unwrap(), &mut sink).unwrap();

        assert_eq!(stats.with_main, 60); // the audio clip occupies track 1
        assert_eq!(stats.with_overlay, 150);
        assert_eq!(stats.with_audio, 60);
    }

    #[test]
    fn invalid_store_refuses_to_export() {
        let mut store = ClipStore::new();
        let mut bad = clip(ClipKind::Video, TrackId::MAIN, 0.0, 5.0);
        bad.source = String::new();
        store.append(bad);

        let mut sink = InMemorySink::new();
        assert!(export_manifests(&store, Fps::new(30, 1).unwrap(), &mut sink).is_err());
    }
}
