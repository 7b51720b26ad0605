//! Playline is a multi-track timeline scheduler and playback compositor.
//!
//! Playline arranges independently generated media clips (video, image,
//! audio) on parallel tracks, advances a logical play-head over them, and
//! resolves, for every instant, what is visible and audible.
//!
//! # Pipeline overview
//!
//! 1. **Place**: `PlaceSpec -> Clip`, appended after the current end of its
//!    own track in the [`ClipStore`]
//! 2. **Resolve**: `ClipStore + t -> active clips` per track, with overlay
//!    fade weights ([`Resolver`])
//! 3. **Compose**: resolved clips become a declarative [`FrameManifest`]
//!    ([`Compositor`])
//! 4. **Drive**: live, the fixed-step [`PlaybackClock`] ticks under a
//!    cooperative [`TickDriver`]; offline, [`export_manifests`] walks the
//!    whole timeline on a frame grid with no clock at all
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Logical time**: the clock advances a fixed step per scheduled tick,
//!   never by measured wall-clock delta; identical tick sequences land on
//!   identical times.
//! - **No media IO**: clips reference artifacts by locator; bytes stay with
//!   the generation and asset layers behind [`Generator`] and
//!   [`AssetCatalog`].
//! - **One writer**: an [`EditorSession`] exclusively owns its store and
//!   clock, so ticks and edits interleave without locking.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compose;
mod eval;
mod foundation;
mod playback;
mod services;
mod session;
mod timeline;
mod tools;

pub use compose::export::{ExportStats, InMemorySink, ManifestSink, SinkConfig, export_manifests};
pub use compose::manifest::{Compositor, FrameManifest, OverlaySlot};
pub use eval::fade::overlay_fade_weight;
pub use eval::resolver::Resolver;
pub use foundation::error::{PlaylineError, PlaylineResult};
pub use foundation::time::{
    Fps, MIN_TIMELINE_SECS, TICK_STEP_SECS, TimeSpan, format_timecode,
};
pub use playback::clock::{PlaybackClock, PlaybackState, TickOutcome};
pub use playback::driver::{TickDriver, TickHandle};
pub use services::assets::{AssetCatalog, AssetId, AssetMeta, AssetRecord, MemoryAssets};
pub use services::entitlement::{Entitlements, PurchaseLedger};
pub use services::generate::{
    Artifact, ArtifactKind, AspectRatio, CannedGenerator, GenerationRequest, Generator,
};
pub use session::editor::EditorSession;
pub use timeline::model::{Clip, ClipId, ClipKind, TrackId};
pub use timeline::place::{DEFAULT_CLIP_SECS, PlaceSpec, infer_track, place};
pub use timeline::store::ClipStore;
pub use tools::catalog::{ToolInputs, ToolKind, ToolSpec, builtin_tools, find_tool};
