use crate::{
    foundation::error::{PlaylineError, PlaylineResult},
    services::generate::{ArtifactKind, AspectRatio, GenerationRequest},
};

/// Generation capability classes the product exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Prompt-to-image synthesis.
    ImageSynthesis,
    /// Prompted edit of an existing image.
    ImageEdit,
    /// Prompt-to-video synthesis, optionally seeded by a still.
    VideoSynthesis,
    /// Text-to-speech narration.
    SpeechSynthesis,
    /// Prompted analysis of attached media.
    TextAnalysis,
    /// Search-grounded question answering.
    GroundedSearch,
    /// Free-form text conversation.
    TextChat,
    /// On-device media capture.
    Capture,
}

impl ToolKind {
    /// The artifact kind tools of this class produce.
    pub fn artifact_kind(self) -> ArtifactKind {
        match self {
            Self::ImageSynthesis | Self::ImageEdit => ArtifactKind::Image,
            Self::VideoSynthesis | Self::Capture => ArtifactKind::Video,
            Self::SpeechSynthesis => ArtifactKind::Audio,
            Self::TextAnalysis | Self::GroundedSearch | Self::TextChat => ArtifactKind::Text,
        }
    }
}

/// Description of one tool in the catalog.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    /// Stable identifier, unique within the catalog. Doubles as the
    /// entitlement feature id for paid tools.
    pub id: String,
    /// Display title, used for clip display names.
    pub title: String,
    /// Capability class.
    pub kind: ToolKind,
    /// Free tools bypass the entitlement gate.
    pub free: bool,
    /// Prompt applied when the caller supplies none. Empty means no default.
    pub default_prompt: String,
    /// A text input must resolve (supplied or defaulted) to build a request.
    pub requires_text: bool,
    /// An attached media locator must be supplied to build a request.
    pub requires_image: bool,
    /// Whether an output aspect-ratio choice applies.
    pub aspect_choice: bool,
}

/// Raw inputs gathered at tool-selection time, before validation.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ToolInputs {
    /// Short prompt or query.
    pub prompt: Option<String>,
    /// Long-form text (narration scripts).
    pub text: Option<String>,
    /// Locator of attached or captured media.
    pub attachment: Option<String>,
    /// Output aspect ratio, where the tool offers the choice.
    pub aspect: Option<AspectRatio>,
}

impl ToolInputs {
    /// Empty inputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prompt.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set the long-form text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the attached media locator.
    pub fn attachment(mut self, locator: impl Into<String>) -> Self {
        self.attachment = Some(locator.into());
        self
    }

    /// Set the output aspect ratio.
    pub fn aspect(mut self, aspect: AspectRatio) -> Self {
        self.aspect = Some(aspect);
        self
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl ToolSpec {
    /// Build the generation request for this tool from raw inputs.
    ///
    /// Required inputs are checked here, before any backend call: a missing
    /// text input falls back to the tool's default prompt when one exists,
    /// a missing required attachment is always an error.
    pub fn build_request(&self, inputs: &ToolInputs) -> PlaylineResult<GenerationRequest> {
        let prompt = non_empty(inputs.prompt.as_deref())
            .or_else(|| non_empty(Some(self.default_prompt.as_str())));
        let text = non_empty(inputs.text.as_deref()).or_else(|| prompt.clone());
        let attachment = non_empty(inputs.attachment.as_deref());

        if self.requires_text && text.is_none() {
            return Err(PlaylineError::validation(format!(
                "tool '{}' requires a text input",
                self.id
            )));
        }
        if self.requires_image && attachment.is_none() {
            return Err(PlaylineError::validation(format!(
                "tool '{}' requires an attached media input",
                self.id
            )));
        }

        let prompt = prompt.unwrap_or_default();
        let aspect = inputs.aspect.unwrap_or_default();
        Ok(match self.kind {
            ToolKind::ImageSynthesis => GenerationRequest::ImageSynthesis { prompt, aspect },
            ToolKind::ImageEdit => GenerationRequest::ImageEdit {
                prompt,
                image: attachment.unwrap_or_default(),
            },
            ToolKind::VideoSynthesis => GenerationRequest::VideoSynthesis {
                prompt,
                image: attachment,
                aspect,
            },
            ToolKind::SpeechSynthesis => GenerationRequest::SpeechSynthesis {
                text: text.unwrap_or_default(),
            },
            ToolKind::TextAnalysis => GenerationRequest::TextAnalysis {
                prompt,
                image: attachment.unwrap_or_default(),
            },
            ToolKind::GroundedSearch => GenerationRequest::GroundedSearch { query: prompt },
            ToolKind::TextChat => GenerationRequest::TextChat { prompt },
            ToolKind::Capture => GenerationRequest::Capture {
                source: attachment.unwrap_or_default(),
            },
        })
    }
}

fn tool(id: &str, title: &str, kind: ToolKind, free: bool) -> ToolSpec {
    ToolSpec {
        id: id.to_string(),
        title: title.to_string(),
        kind,
        free,
        default_prompt: String::new(),
        requires_text: true,
        requires_image: false,
        aspect_choice: false,
    }
}

/// The built-in tool catalog, in presentation order.
pub fn builtin_tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            aspect_choice: true,
            ..tool("video-gen", "Video Generator", ToolKind::VideoSynthesis, false)
        },
        ToolSpec {
            aspect_choice: true,
            ..tool("image-gen", "Image Generator", ToolKind::ImageSynthesis, true)
        },
        ToolSpec {
            default_prompt: "Restore this photograph: repair damage and correct fading."
                .to_string(),
            requires_text: false,
            requires_image: true,
            ..tool("photo-restore", "Photo Restorer", ToolKind::ImageEdit, false)
        },
        ToolSpec {
            default_prompt: "Replace the background with a clean studio backdrop.".to_string(),
            requires_text: false,
            requires_image: true,
            ..tool("background-swap", "Background Swap", ToolKind::ImageEdit, false)
        },
        tool("narrator", "Narrator", ToolKind::SpeechSynthesis, false),
        ToolSpec {
            default_prompt: "Describe this scene.".to_string(),
            requires_text: false,
            requires_image: true,
            ..tool("scene-analyst", "Scene Analyst", ToolKind::TextAnalysis, true)
        },
        tool("grounded-search", "Grounded Search", ToolKind::GroundedSearch, true),
        tool("chat", "Chat", ToolKind::TextChat, true),
        ToolSpec {
            requires_text: false,
            requires_image: true,
            ..tool("recorder", "Recorder", ToolKind::Capture, true)
        },
    ]
}

/// Look up a built-in tool by id.
pub fn find_tool(id: &str) -> Option<ToolSpec> {
    builtin_tools().into_iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn builtin_ids_are_unique() {
        let tools = builtin_tools();
        let ids: BTreeSet<_> = tools.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), tools.len());
    }

    #[test]
    fn default_prompt_covers_a_missing_text_input() {
        let spec = find_tool("photo-restore").unwrap();
        let request = spec
            .build_request(&ToolInputs::new().attachment("asset/scan-01.png"))
            .unwrap();
        match request {
            GenerationRequest::ImageEdit { prompt, image } => {
                assert!(prompt.starts_with("Restore this photograph"));
                assert_eq!(image, "asset/scan-01.png");
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn missing_required_attachment_is_rejected() {
        let spec = find_tool("photo-restore").unwrap();
        let err = spec.build_request(&ToolInputs::new()).unwrap_err();
        assert!(err.to_string().contains("attached media"));
    }

    #[test]
    fn missing_required_text_is_rejected() {
        let spec = find_tool("narrator").unwrap();
        assert!(spec.build_request(&ToolInputs::new()).is_err());

        let request = spec
            .build_request(&ToolInputs::new().text("Welcome to the reel."))
            .unwrap();
        assert_eq!(
            request,
            GenerationRequest::SpeechSynthesis {
                text: "Welcome to the reel.".to_string()
            }
        );
    }

    #[test]
    fn video_request_carries_reference_and_aspect() {
        let spec = find_tool("video-gen").unwrap();
        let request = spec
            .build_request(
                &ToolInputs::new()
                    .prompt("a lighthouse at dusk")
                    .attachment("asset/still.png")
                    .aspect(AspectRatio::Portrait),
            )
            .unwrap();
        match request {
            GenerationRequest::VideoSynthesis { prompt, image, aspect } => {
                assert_eq!(prompt, "a lighthouse at dusk");
                assert_eq!(image.as_deref(), Some("asset/still.png"));
                assert_eq!(aspect, AspectRatio::Portrait);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn kinds_declare_their_artifact() {
        assert_eq!(ToolKind::Capture.artifact_kind(), ArtifactKind::Video);
        assert_eq!(ToolKind::SpeechSynthesis.artifact_kind(), ArtifactKind::Audio);
        assert_eq!(ToolKind::TextChat.artifact_kind(), ArtifactKind::Text);
        assert_eq!(ToolKind::ImageEdit.artifact_kind(), ArtifactKind::Image);
    }
}
