//! Workbench state as an immutable record.
//!
//! Every user edit and every service completion is an [`Action`]; applying it
//! yields the next [`WorkbenchState`]. The busy flags are independent of each
//! other and `apply` never refuses a start action, so overlapping submissions
//! are possible and the last completion wins.

use crate::models::CodeModel;
use crate::wire::{GenerationRequest, RenderRequest};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkbenchState {
    /// Natural-language prompt being edited
    pub prompt: String,
    pub model: CodeModel,
    /// Code held by the render editor, submitted on render
    pub render_code: String,
    /// Code held by the prompt-to-code editor, the source of copy and download
    pub generated_code: String,
    pub video_url: Option<String>,
    pub generation_in_flight: bool,
    pub render_in_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    EditPrompt(String),
    SelectModel(CodeModel),
    EditRenderCode(String),
    EditGeneratedCode(String),
    /// Generate-only submission
    GenerationStarted,
    GenerationFinished(Option<String>),
    /// Generate-then-render submission
    PipelineStarted,
    /// Code forwarded to the render step, empty when generation failed
    PipelineCodeReceived(String),
    /// Render-only submission
    RenderStarted,
    /// Ends both render-only and generate-then-render submissions
    RenderFinished(Option<String>),
}

impl WorkbenchState {
    pub fn new(prompt: impl Into<String>, model: CodeModel) -> Self {
        Self {
            prompt: prompt.into(),
            model,
            ..Self::default()
        }
    }

    /// Compute the next state
    ///
    /// A `None` completion is a failed call: previous values are kept and only
    /// the busy flag is cleared.
    pub fn apply(self, action: Action) -> Self {
        match action {
            Action::EditPrompt(prompt) => Self { prompt, ..self },
            Action::SelectModel(model) => Self { model, ..self },
            Action::EditRenderCode(render_code) => Self {
                render_code,
                ..self
            },
            Action::EditGeneratedCode(generated_code) => Self {
                generated_code,
                ..self
            },
            Action::GenerationStarted => Self {
                generation_in_flight: true,
                ..self
            },
            Action::GenerationFinished(code) => Self {
                generated_code: code.unwrap_or(self.generated_code),
                generation_in_flight: false,
                ..self
            },
            Action::PipelineStarted | Action::RenderStarted => Self {
                render_in_flight: true,
                ..self
            },
            Action::PipelineCodeReceived(render_code) => Self {
                render_code,
                ..self
            },
            Action::RenderFinished(video_url) => Self {
                video_url: video_url.or(self.video_url),
                render_in_flight: false,
                ..self
            },
        }
    }

    /// Whether the generate-only submit control is enabled
    pub fn can_submit_generation(&self) -> bool {
        !self.generation_in_flight
    }

    /// Whether the render and generate-then-render submit controls are enabled
    pub fn can_submit_render(&self) -> bool {
        !self.render_in_flight
    }

    /// Whether copy and download are available
    pub fn can_export(&self) -> bool {
        !self.generated_code.is_empty()
    }

    pub fn generation_request(&self) -> GenerationRequest {
        GenerationRequest::new(self.prompt.clone(), self.model)
    }

    /// Snapshot of the render editor at submission time
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest::new(self.render_code.clone())
    }
}
