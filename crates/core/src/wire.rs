//! Request and response payloads exchanged with the generation and render services.
//!
//! The generation endpoint takes a chat-style body and answers with raw source
//! text. The render endpoint takes `{ "code": ... }` and answers with
//! `{ "video_url": ... }`.

use crate::models::CodeModel;
use serde::{Deserialize, Serialize};

/// A prompt submitted for code generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: CodeModel,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, model: CodeModel) -> Self {
        Self {
            prompt: prompt.into(),
            model,
        }
    }
}

/// Source code returned by the generation service, kept verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub source_code: String,
}

/// Source code submitted for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub source_code: String,
}

impl RenderRequest {
    pub fn new(source_code: impl Into<String>) -> Self {
        Self {
            source_code: source_code.into(),
        }
    }
}

impl From<GenerationResult> for RenderRequest {
    fn from(result: GenerationResult) -> Self {
        Self {
            source_code: result.source_code,
        }
    }
}

/// Location of a rendered video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResult {
    pub video_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Body of `POST /generate-code`
///
/// `model` is only present when a non-default model was selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateCodeBody {
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<CodeModel>,
}

impl GenerateCodeBody {
    /// The prompt travels as a single user message, untouched
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            messages: vec![ChatMessage {
                role: Role::User,
                content: request.prompt.clone(),
            }],
            model: (!request.model.is_default()).then_some(request.model),
        }
    }
}

/// Body of `POST /generate-video`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderBody {
    pub code: String,
}

impl RenderBody {
    pub fn from_request(request: &RenderRequest) -> Self {
        Self {
            code: request.source_code.clone(),
        }
    }
}

/// Response of `POST /generate-video`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResponse {
    pub video_url: String,
}

/// Parse the render service response body
///
/// Malformed JSON or a missing `video_url` field is a failure.
pub fn parse_render_response(body: &str) -> Result<RenderResult, String> {
    let response: RenderResponse = serde_json::from_str(body)
        .map_err(|e| format!("Malformed render response: {}", e))?;

    Ok(RenderResult {
        video_url: response.video_url,
    })
}
