use genmanim_core::models::CodeModel;
use genmanim_core::wire::{GenerationRequest, RenderRequest};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{internal_error, CallToolResult, Content, JsonRpcError};

#[derive(Deserialize)]
struct PromptArgs {
    prompt: String,
    #[serde(default)]
    model: Option<CodeModel>,
}

#[derive(Deserialize)]
struct RenderArgs {
    code: String,
}

fn parse_args<T: DeserializeOwned>(arguments: Option<serde_json::Value>) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null)).map_err(|e| {
        JsonRpcError {
            code: -32602,
            message: format!("Invalid arguments: {e}"),
            data: None,
        }
    })
}

fn generation_request(args: PromptArgs) -> Result<GenerationRequest, JsonRpcError> {
    if args.prompt.is_empty() {
        return Err(JsonRpcError {
            code: -32602,
            message: "Invalid arguments: prompt must not be empty".to_string(),
            data: None,
        });
    }

    Ok(GenerationRequest::new(
        args.prompt,
        args.model.unwrap_or_default(),
    ))
}

fn tool_result(text: String, is_error: bool) -> Result<serde_json::Value, JsonRpcError> {
    let result = CallToolResult {
        content: vec![Content::Text { text }],
        is_error: is_error.then_some(true),
    };

    serde_json::to_value(result).map_err(internal_error)
}

pub async fn handle_generate_code(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let request = generation_request(parse_args(arguments)?)?;

    match global.orchestrator().generate_code(&request).await {
        Ok(result) => tool_result(result.source_code, false),
        Err(e) => tool_result(e.to_string(), true),
    }
}

pub async fn handle_render_code(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: RenderArgs = parse_args(arguments)?;

    match global
        .orchestrator()
        .render_code(&RenderRequest::new(args.code))
        .await
    {
        Ok(result) => {
            let json = serde_json::to_string_pretty(&result).map_err(internal_error)?;
            tool_result(json, false)
        }
        Err(e) => tool_result(e.to_string(), true),
    }
}

pub async fn handle_generate_video(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let request = generation_request(parse_args(arguments)?)?;

    let outcome = global.orchestrator().generate_then_render(&request).await;

    let payload = serde_json::json!({
        "code": outcome.forwarded_code(),
        "video_url": outcome.video.as_ref().ok().map(|r| r.video_url.as_str()),
        "generation_error": outcome.code.as_ref().err().map(|e| e.to_string()),
        "render_error": outcome.video.as_ref().err().map(|e| e.to_string()),
    });
    let json = serde_json::to_string_pretty(&payload).map_err(internal_error)?;

    tool_result(json, outcome.video.is_err())
}
