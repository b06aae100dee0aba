//! Sequencing of the generation and render services.
//!
//! [`Orchestrator`] exposes generate-only, render-only and generate-then-render
//! as explicit `Result`s. [`absorb`] turns a failure into "no result" after
//! logging it, and [`Session`] uses that to drive a [`WorkbenchState`].

use crate::client::ServiceClient;
use crate::error::Error;
use genmanim_core::wire::{GenerationRequest, GenerationResult, RenderRequest, RenderResult};
use genmanim_core::workbench::{Action, WorkbenchState};

/// Result of one generate-then-render run
#[derive(Debug)]
pub struct PipelineOutcome {
    pub code: Result<GenerationResult, Error>,
    pub video: Result<RenderResult, Error>,
}

impl PipelineOutcome {
    /// The code that was forwarded to the render step
    pub fn forwarded_code(&self) -> &str {
        self.code
            .as_ref()
            .map(|result| result.source_code.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct Orchestrator {
    client: ServiceClient,
}

impl Orchestrator {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub async fn generate_code(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, Error> {
        self.client.generate_code(request).await
    }

    pub async fn render_code(&self, request: &RenderRequest) -> Result<RenderResult, Error> {
        self.client.render_code(request).await
    }

    /// Generate code, then render whatever came back
    ///
    /// Rendering starts only after generation completes and is always
    /// attempted, with an empty string when generation failed.
    pub async fn generate_then_render(&self, request: &GenerationRequest) -> PipelineOutcome {
        let code = self.client.generate_code(request).await;
        let render_request = forward_to_render(&code);
        let video = self.client.render_code(&render_request).await;

        PipelineOutcome { code, video }
    }
}

/// The render request that follows a generation attempt
///
/// A failed generation forwards an empty string.
pub fn forward_to_render(code: &Result<GenerationResult, Error>) -> RenderRequest {
    match code {
        Ok(result) => RenderRequest::new(result.source_code.clone()),
        Err(e) => {
            log::warn!("Code generation failed, rendering empty code: {}", e);
            RenderRequest::default()
        }
    }
}

/// Log a failed remote call and reduce it to "no result"
pub fn absorb<T>(result: Result<T, Error>, operation: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("{} failed: {}", operation, e);
            None
        }
    }
}

/// A workbench driven through the orchestrator
///
/// Each submission applies its start action, awaits the remote call, absorbs
/// a failure and applies the finish action.
#[derive(Debug)]
pub struct Session {
    orchestrator: Orchestrator,
    state: WorkbenchState,
}

impl Session {
    pub fn new(orchestrator: Orchestrator, state: WorkbenchState) -> Self {
        Self {
            orchestrator,
            state,
        }
    }

    pub fn state(&self) -> &WorkbenchState {
        &self.state
    }

    pub fn into_state(self) -> WorkbenchState {
        self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state = std::mem::take(&mut self.state).apply(action);
    }

    /// Generate-only: fills the prompt-to-code editor
    pub async fn submit_generation(&mut self) {
        self.dispatch(Action::GenerationStarted);
        let request = self.state.generation_request();

        let code = absorb(
            self.orchestrator.generate_code(&request).await,
            "Code generation",
        );

        self.dispatch(Action::GenerationFinished(code.map(|r| r.source_code)));
    }

    /// Render-only: submits the render editor as it is right now
    pub async fn submit_render(&mut self) {
        let request = self.state.render_request();
        self.dispatch(Action::RenderStarted);

        let video = absorb(self.orchestrator.render_code(&request).await, "Rendering");

        self.dispatch(Action::RenderFinished(video.map(|r| r.video_url)));
    }

    /// Generate-then-render: generated code lands in the render editor
    ///
    /// The forwarded code is written to the render editor before the render
    /// call starts, and the render request is that editor's snapshot.
    pub async fn submit_pipeline(&mut self) {
        self.dispatch(Action::PipelineStarted);
        let request = self.state.generation_request();

        let code = self.orchestrator.generate_code(&request).await;
        let forwarded = forward_to_render(&code);
        absorb(code, "Code generation");
        self.dispatch(Action::PipelineCodeReceived(forwarded.source_code));

        let render_request = self.state.render_request();
        let video = absorb(
            self.orchestrator.render_code(&render_request).await,
            "Rendering",
        );

        self.dispatch(Action::RenderFinished(video.map(|r| r.video_url)));
    }
}
