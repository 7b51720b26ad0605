use std::collections::BTreeMap;

use crate::{
    foundation::error::{PlaylineError, PlaylineResult},
    timeline::model::ClipKind,
    tools::catalog::ToolKind,
};

/// Media kind of a produced artifact.
///
/// Wider than [`ClipKind`]: text artifacts exist (analysis, chat, search
/// results) but are not placeable on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Still image.
    Image,
    /// Video.
    Video,
    /// Audio.
    Audio,
    /// Plain text; never placed on the timeline.
    Text,
}

impl TryFrom<ArtifactKind> for ClipKind {
    type Error = PlaylineError;

    fn try_from(kind: ArtifactKind) -> Result<Self, Self::Error> {
        match kind {
            ArtifactKind::Image => Ok(ClipKind::Image),
            ArtifactKind::Video => Ok(ClipKind::Video),
            ArtifactKind::Audio => Ok(ClipKind::Audio),
            ArtifactKind::Text => Err(PlaylineError::validation(
                "text artifacts cannot be placed on the timeline",
            )),
        }
    }
}

/// Output of a generation backend: a kind plus a locator.
///
/// The locator references media owned by the backend or asset layer; the
/// artifact itself carries no bytes.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Artifact {
    /// Media kind of the produced resource.
    pub kind: ArtifactKind,
    /// Locator of the produced resource.
    pub locator: String,
}

impl Artifact {
    /// Convenience constructor.
    pub fn new(kind: ArtifactKind, locator: impl Into<String>) -> Self {
        Self {
            kind,
            locator: locator.into(),
        }
    }
}

/// Output aspect ratio for visual synthesis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    /// 16:9 landscape.
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
    /// 9:16 portrait.
    #[serde(rename = "9:16")]
    Portrait,
    /// 1:1 square.
    #[serde(rename = "1:1")]
    Square,
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Widescreen => "16:9",
            Self::Portrait => "9:16",
            Self::Square => "1:1",
        };
        f.write_str(s)
    }
}

/// A fully-resolved generation request.
///
/// One variant per tool kind, each carrying exactly the inputs that kind
/// requires. Built by [`ToolSpec::build_request`](crate::ToolSpec::build_request),
/// which validates inputs before any backend is consulted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum GenerationRequest {
    /// Synthesize a still image from a prompt.
    ImageSynthesis {
        /// Subject prompt.
        prompt: String,
        /// Output aspect ratio.
        aspect: AspectRatio,
    },
    /// Edit an existing image under a prompt.
    ImageEdit {
        /// Edit instruction.
        prompt: String,
        /// Locator of the image being edited.
        image: String,
    },
    /// Synthesize video from a prompt, optionally seeded by a still.
    VideoSynthesis {
        /// Subject prompt.
        prompt: String,
        /// Optional reference still locator.
        image: Option<String>,
        /// Output aspect ratio.
        aspect: AspectRatio,
    },
    /// Synthesize narration audio from text.
    SpeechSynthesis {
        /// Text to voice.
        text: String,
    },
    /// Analyze an attached image under a prompt.
    TextAnalysis {
        /// Question about the attachment.
        prompt: String,
        /// Locator of the attachment.
        image: String,
    },
    /// Answer a query with grounded search.
    GroundedSearch {
        /// Search query.
        query: String,
    },
    /// Free-form text conversation.
    TextChat {
        /// User message.
        prompt: String,
    },
    /// Import media captured on-device.
    Capture {
        /// Locator of the captured media.
        source: String,
    },
}

impl GenerationRequest {
    /// The tool kind this request was built for.
    pub fn tool_kind(&self) -> ToolKind {
        match self {
            Self::ImageSynthesis { .. } => ToolKind::ImageSynthesis,
            Self::ImageEdit { .. } => ToolKind::ImageEdit,
            Self::VideoSynthesis { .. } => ToolKind::VideoSynthesis,
            Self::SpeechSynthesis { .. } => ToolKind::SpeechSynthesis,
            Self::TextAnalysis { .. } => ToolKind::TextAnalysis,
            Self::GroundedSearch { .. } => ToolKind::GroundedSearch,
            Self::TextChat { .. } => ToolKind::TextChat,
            Self::Capture { .. } => ToolKind::Capture,
        }
    }

    /// The artifact kind a backend is expected to produce for this request.
    pub fn artifact_kind(&self) -> ArtifactKind {
        self.tool_kind().artifact_kind()
    }
}

/// Generation backend boundary.
///
/// Implementations turn a request into an artifact synchronously from the
/// session's point of view; a failed backend surfaces as an error from the
/// placement attempt with no partial clip.
pub trait Generator {
    /// Produce an artifact for `request`.
    fn generate(&self, request: &GenerationRequest) -> PlaylineResult<Artifact>;
}

/// Table-driven [`Generator`] serving pre-configured artifacts per tool kind.
///
/// Used by tests and the offline CLI; request payloads are accepted but not
/// interpreted. An unconfigured kind fails with a generation error.
#[derive(Debug, Default)]
pub struct CannedGenerator {
    canned: BTreeMap<ToolKind, Artifact>,
}

impl CannedGenerator {
    /// An empty table; every request fails until kinds are configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the artifact served for `kind`.
    pub fn with(mut self, kind: ToolKind, artifact: Artifact) -> Self {
        self.canned.insert(kind, artifact);
        self
    }
}

impl Generator for CannedGenerator {
    fn generate(&self, request: &GenerationRequest) -> PlaylineResult<Artifact> {
        let kind = request.tool_kind();
        self.canned.get(&kind).cloned().ok_or_else(|| {
            PlaylineError::generation(format!("no canned artifact for {kind:?}"))
        })
    }
}
