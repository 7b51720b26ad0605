use std::collections::BTreeMap;

use crate::{
    compose::manifest::{Compositor, FrameManifest},
    foundation::error::{PlaylineError, PlaylineResult},
    playback::clock::{PlaybackClock, PlaybackState},
    playback::driver::{TickDriver, TickHandle},
    services::assets::AssetRecord,
    services::entitlement::Entitlements,
    services::generate::Generator,
    timeline::model::{Clip, ClipId, ClipKind},
    timeline::place::{PlaceSpec, place},
    timeline::store::ClipStore,
    tools::catalog::{ToolInputs, ToolSpec},
};

/// One open editor workspace: clip store, logical clock, tick scheduling and
/// per-tool naming, behind a single owner.
///
/// The session is the only writer of its store and clock: mutations
/// (placement, removal, seeks) interleave with ticks only between
/// [`pump`](Self::pump) calls, and every tick resolves against the store as
/// it stands. The tick driver is owned by the session, so dropping the
/// session retires any outstanding tick request with it; `pause` and `reset`
/// cancel explicitly.
///
/// Sessions are independent; tests routinely run several side by side.
#[derive(Debug, Default)]
pub struct EditorSession {
    store: ClipStore,
    clock: PlaybackClock,
    driver: TickDriver,
    pending_tick: Option<TickHandle>,
    name_counts: BTreeMap<String, u32>,
}

impl EditorSession {
    /// An ungated session with an empty timeline, paused at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session over an existing timeline document, paused at zero.
    pub fn with_store(store: ClipStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    /// Gated constructor: open the workspace for `tool` as `identity`.
    ///
    /// Free tools always pass; a paid tool requires the gate to report its id
    /// unlocked. Denial happens before any timeline state exists.
    pub fn enter(
        tool: &ToolSpec,
        identity: &str,
        gate: &dyn Entitlements,
    ) -> PlaylineResult<Self> {
        if !tool.free && !gate.is_unlocked(identity, &tool.id) {
            tracing::debug!(tool = %tool.id, identity, "workspace entry denied");
            return Err(PlaylineError::entitlement(format!(
                "tool '{}' is locked for identity '{}'",
                tool.id, identity
            )));
        }
        Ok(Self::new())
    }

    /// Borrow the clip store.
    pub fn store(&self) -> &ClipStore {
        &self.store
    }

    /// Borrow the playback clock.
    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// Derived timeline duration in seconds.
    pub fn timeline_duration_secs(&self) -> f64 {
        self.store.timeline_duration_secs()
    }

    /// True while a tick request is outstanding.
    pub fn has_pending_tick(&self) -> bool {
        self.driver.has_pending()
    }

    /// Run `tool` against `backend` and place the produced artifact.
    ///
    /// The request is validated before the backend is consulted, and the
    /// artifact is validated before the store is touched, so any failure
    /// leaves the timeline exactly as it was. Placed clips are named
    /// `"<tool title> <n>"`, where `n` counts this tool's successful
    /// placements in the session.
    pub fn generate_and_place(
        &mut self,
        tool: &ToolSpec,
        inputs: &ToolInputs,
        backend: &dyn Generator,
    ) -> PlaylineResult<Clip> {
        let request = tool.build_request(inputs)?;
        let artifact = backend.generate(&request)?;
        let kind = ClipKind::try_from(artifact.kind)?;
        self.place_named(kind, artifact.locator, &tool.id, &tool.title)
    }

    /// Place a stored artifact from the asset catalog onto the timeline.
    pub fn import_asset(&mut self, record: &AssetRecord) -> PlaylineResult<Clip> {
        let kind = ClipKind::try_from(record.kind)?;
        self.place_named(kind, record.locator.clone(), &record.tool_id, &record.tool_title)
    }

    fn place_named(
        &mut self,
        kind: ClipKind,
        source: String,
        tool_id: &str,
        tool_title: &str,
    ) -> PlaylineResult<Clip> {
        let next = self.name_counts.get(tool_id).copied().unwrap_or(0) + 1;
        let spec = PlaceSpec::new(kind, source).display_name(format!("{tool_title} {next}"));
        let clip = place(&mut self.store, spec)?;
        self.name_counts.insert(tool_id.to_string(), next);
        Ok(clip)
    }

    /// Remove a clip. Benign no-op returning `false` on an unknown id.
    pub fn remove_clip(&mut self, id: ClipId) -> bool {
        self.store.remove(id)
    }

    /// Start playback and schedule the next tick.
    pub fn play(&mut self) {
        self.clock.play();
        self.schedule_tick();
    }

    /// Pause playback and cancel the pending tick, if any.
    pub fn pause(&mut self) {
        self.clock.pause();
        self.cancel_pending();
    }

    /// Flip between playing and paused.
    pub fn toggle(&mut self) {
        match self.clock.state() {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.play(),
        }
    }

    /// Move the play-head, clamped into the timeline. Transport state is
    /// untouched.
    pub fn seek(&mut self, t: f64) {
        let duration = self.timeline_duration_secs();
        self.clock.seek(t, duration);
    }

    /// Compose the live manifest at the current play-head without ticking.
    pub fn compose_now(&self) -> FrameManifest {
        Compositor::compose_live(&self.store, self.clock.current_secs())
    }

    /// Fire the due tick, if any: advance the clock, compose the live frame
    /// at the new time, and reschedule while still playing.
    ///
    /// Returns `None` when no tick was due, which is also the steady state
    /// after completion or a pause.
    pub fn pump(&mut self) -> Option<FrameManifest> {
        self.driver.take_due()?;
        self.pending_tick = None;

        let duration = self.store.timeline_duration_secs();
        self.clock.tick(duration);
        let manifest = Compositor::compose_live(&self.store, self.clock.current_secs());
        if self.clock.is_playing() {
            self.schedule_tick();
        }
        Some(manifest)
    }

    /// Clear the timeline, rewind and pause the clock, cancel any pending
    /// tick, and restart the naming counters. The session stays usable.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.store.clear();
        self.clock = PlaybackClock::new();
        self.name_counts.clear();
        tracing::debug!("session reset");
    }

    fn schedule_tick(&mut self) {
        self.pending_tick = Some(self.driver.request());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_tick.take() {
            self.driver.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        foundation::time::TICK_STEP_SECS,
        services::entitlement::PurchaseLedger,
        services::generate::{Artifact, ArtifactKind, CannedGenerator},
        timeline::model::TrackId,
        tools::catalog::{ToolKind, find_tool},
    };

    fn video_backend() -> CannedGenerator {
        CannedGenerator::new().with(
            ToolKind::VideoSynthesis,
            Artifact::new(ArtifactKind::Video, "gen/take-01.mp4"),
        )
    }

    fn video_inputs() -> ToolInputs {
        ToolInputs::new().prompt("a lighthouse at dusk")
    }

    #[test]
    fn enter_gates_paid_tools_on_the_ledger() {
        let video_gen = find_tool("video-gen").unwrap();
        let chat = find_tool("chat").unwrap();
        let mut ledger = PurchaseLedger::new();

        let err = EditorSession::enter(&video_gen, "ana", &ledger).unwrap_err();
        assert!(err.to_string().starts_with("entitlement error"));

        // Free tools bypass the ledger entirely.
        assert!(EditorSession::enter(&chat, "ana", &ledger).is_ok());

        ledger.record_purchase("ana", "video-gen");
        assert!(EditorSession::enter(&video_gen, "ana", &ledger).is_ok());
    }

    #[test]
    fn generated_clips_take_numbered_names_back_to_back() {
        let tool = find_tool("video-gen").unwrap();
        let backend = video_backend();
        let mut session = EditorSession::new();

        let first = session
            .generate_and_place(&tool, &video_inputs(), &backend)
            .unwrap();
        let second = session
            .generate_and_place(&tool, &video_inputs(), &backend)
            .unwrap();

        assert_eq!(first.display_name, "Video Generator 1");
        assert_eq!(second.display_name, "Video Generator 2");
        assert_eq!(first.span.start_secs, 0.0);
        assert_eq!(second.span.start_secs, 5.0);
        assert_eq!(first.track, TrackId::MAIN);
    }

    #[test]
    fn text_tools_never_reach_the_timeline() {
        let tool = find_tool("chat").unwrap();
        let backend = CannedGenerator::new().with(
            ToolKind::TextChat,
            Artifact::new(ArtifactKind::Text, "gen/answer.txt"),
        );
        let mut session = EditorSession::new();

        let err = session
            .generate_and_place(&tool, &ToolInputs::new().prompt("hi"), &backend)
            .unwrap_err();
        assert!(err.to_string().starts_with("validation error"));
        assert!(session.store().is_empty());
    }

    #[test]
    fn backend_failure_leaves_the_store_untouched() {
        let tool = find_tool("video-gen").unwrap();
        let mut session = EditorSession::new();

        // Empty backend: every request fails.
        let backend = CannedGenerator::new();
        assert!(
            session
                .generate_and_place(&tool, &video_inputs(), &backend)
                .is_err()
        );
        assert!(session.store().is_empty());

        // The failed attempt did not consume a name.
        let clip = session
            .generate_and_place(&tool, &video_inputs(), &video_backend())
            .unwrap();
        assert_eq!(clip.display_name, "Video Generator 1");
    }

    #[test]
    fn pump_fires_only_while_a_tick_is_due() {
        let mut session = EditorSession::new();
        assert!(session.pump().is_none());

        session.play();
        let manifest = session.pump().unwrap();
        assert_eq!(manifest.time_secs, TICK_STEP_SECS);
        // Still playing, so the next tick was rescheduled.
        assert!(session.has_pending_tick());

        session.pause();
        assert!(!session.has_pending_tick());
        assert!(session.pump().is_none());
    }

    #[test]
    fn playback_completes_paused_and_rewound() {
        let mut session = EditorSession::new();
        session.play();

        // Empty timeline runs to the 30 s floor; bound the loop well past it.
        let mut pumps = 0u32;
        for _ in 0..4000 {
            if session.pump().is_none() {
                break;
            }
            pumps += 1;
        }

        assert!(pumps > 1000, "completed after only {pumps} ticks");
        assert!(!session.clock().is_playing());
        assert_eq!(session.clock().current_secs(), 0.0);
        assert!(!session.has_pending_tick());
    }

    #[test]
    fn deleting_the_active_clip_empties_the_next_frame() {
        let tool = find_tool("video-gen").unwrap();
        let mut session = EditorSession::new();
        let clip = session
            .generate_and_place(&tool, &video_inputs(), &video_backend())
            .unwrap();

        session.play();
        let manifest = session.pump().unwrap();
        assert!(manifest.main.is_some());

        assert!(session.remove_clip(clip.id));
        let manifest = session.pump().unwrap();
        assert!(manifest.main.is_none());
    }

    #[test]
    fn reset_restores_a_fresh_workspace() {
        let tool = find_tool("video-gen").unwrap();
        let backend = video_backend();
        let mut session = EditorSession::new();
        session
            .generate_and_place(&tool, &video_inputs(), &backend)
            .unwrap();
        session.play();
        session.pump();

        session.reset();
        assert!(session.store().is_empty());
        assert!(!session.clock().is_playing());
        assert_eq!(session.clock().current_secs(), 0.0);
        assert!(!session.has_pending_tick());

        // Naming restarts from 1.
        let clip = session
            .generate_and_place(&tool, &video_inputs(), &backend)
            .unwrap();
        assert_eq!(clip.display_name, "Video Generator 1");
    }

    #[test]
    fn imported_assets_place_like_generated_ones() {
        use crate::services::assets::{AssetCatalog, AssetMeta, MemoryAssets};

        let mut assets = MemoryAssets::new();
        let record = assets
            .persist(
                "ana",
                &Artifact::new(ArtifactKind::Image, "asset/still.png"),
                AssetMeta {
                    tool_id: "image-gen".to_string(),
                    tool_title: "Image Generator".to_string(),
                },
            )
            .unwrap();

        let mut session = EditorSession::new();
        let clip = session.import_asset(&record).unwrap();
        assert_eq!(clip.track, TrackId::OVERLAY);
        assert_eq!(clip.display_name, "Image Generator 1");
        assert_eq!(clip.source, "asset/still.png");
    }
}
