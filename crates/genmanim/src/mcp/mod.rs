mod cli;
mod stdio;
mod tools;

pub use cli::App;

use crate::prelude::*;
use serde::{Deserialize, Serialize};

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        cli::Commands::Stdio => stdio::run_stdio(global).await,
    }
}

/// Handle one JSON-RPC message, returning `None` for notifications
pub async fn handle_request(request_str: &str, global: &crate::Global) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(request_str) {
        Ok(req) => req,
        Err(e) => {
            return Some(JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: None,
                result: None,
                error: Some(JsonRpcError {
                    code: -32700,
                    message: format!("Parse error: {e}"),
                    data: None,
                }),
            });
        }
    };

    if request.id.is_none() && request.method.starts_with("notifications/") {
        return None;
    }

    let result = match request.method.as_str() {
        "initialize" => tools::handle_initialize(),
        "tools/list" => tools::handle_tools_list(),
        "tools/call" => tools::handle_tools_call(request.params, global).await,
        method => Err(JsonRpcError {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }),
    };

    Some(match result {
        Ok(value) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: Some(value),
            error: None,
        },
        Err(error) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: None,
            error: Some(error),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn global(api_url: &str) -> crate::Global {
        crate::Global {
            api_url: api_url.to_string(),
            verbose: false,
        }
    }

    async fn call(request: serde_json::Value, global: &crate::Global) -> serde_json::Value {
        let response = handle_request(&request.to_string(), global)
            .await
            .expect("request with id gets a response");
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = handle_request("{not json", &global("http://localhost"))
            .await
            .unwrap();
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn test_notification_has_no_response() {
        let request = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
        let response = handle_request(&request.to_string(), &global("http://localhost")).await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let value = call(
            json!({ "jsonrpc": "2.0", "id": 1, "method": "resources/list" }),
            &global("http://localhost"),
        )
        .await;
        assert_eq!(value["error"]["code"], -32601);
        assert_eq!(value["id"], 1);
    }

    #[tokio::test]
    async fn test_initialize() {
        let value = call(
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" }),
            &global("http://localhost"),
        )
        .await;
        assert_eq!(value["result"]["serverInfo"]["name"], "genmanim");
    }

    #[tokio::test]
    async fn test_tools_list() {
        let value = call(
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
            &global("http://localhost"),
        )
        .await;

        let names: Vec<&str> = value["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|tool| tool["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["generate_code", "render_code", "generate_video"]);
    }

    #[tokio::test]
    async fn test_tools_call_generate_video() {
        let mut server = Server::new_async().await;
        let generate = server
            .mock("POST", "/generate-code")
            .match_body(Matcher::Json(json!({
                "messages": [{ "role": "user", "content": "Draw a red circle" }]
            })))
            .with_status(200)
            .with_body("from manim import *\n")
            .expect(1)
            .create_async()
            .await;
        let render = server
            .mock("POST", "/generate-video")
            .match_body(Matcher::Json(json!({ "code": "from manim import *\n" })))
            .with_status(200)
            .with_body(r#"{"video_url":"https://cdn.example.com/mcp.mp4"}"#)
            .expect(1)
            .create_async()
            .await;

        let value = call(
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {
                    "name": "generate_video",
                    "arguments": { "prompt": "Draw a red circle" }
                }
            }),
            &global(&server.url()),
        )
        .await;

        let text = value["result"]["content"][0]["text"].as_str().unwrap();
        let payload: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload["code"], "from manim import *\n");
        assert_eq!(payload["video_url"], "https://cdn.example.com/mcp.mp4");
        assert!(value["result"]["isError"].is_null());
        generate.assert_async().await;
        render.assert_async().await;
    }

    #[tokio::test]
    async fn test_tools_call_render_failure_is_tool_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/generate-video")
            .with_status(500)
            .create_async()
            .await;

        let value = call(
            json!({
                "jsonrpc": "2.0",
                "id": 4,
                "method": "tools/call",
                "params": { "name": "render_code", "arguments": { "code": "" } }
            }),
            &global(&server.url()),
        )
        .await;

        assert_eq!(value["result"]["isError"], true);
        assert!(value["result"]["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_tools_call_unknown_model() {
        let value = call(
            json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "tools/call",
                "params": {
                    "name": "generate_code",
                    "arguments": { "prompt": "Draw", "model": "gpt-2" }
                }
            }),
            &global("http://localhost"),
        )
        .await;

        assert_eq!(value["error"]["code"], -32602);
    }
}
