use crate::error::Error;
use genmanim_core::wire::{
    parse_render_response, GenerateCodeBody, GenerationRequest, GenerationResult, RenderBody,
    RenderRequest, RenderResult,
};

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const GENERATE_CODE_PATH: &str = "/generate-code";
pub const GENERATE_VIDEO_PATH: &str = "/generate-video";

/// Where the generation and render services live
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Join an endpoint path onto the base URL, tolerating a trailing slash
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// HTTP client for the two external services
///
/// Requests carry no timeout and are never retried.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl ServiceClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// `POST /generate-code`, returning the response body verbatim
    pub async fn generate_code(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, Error> {
        let url = self.config.endpoint(GENERATE_CODE_PATH);
        let body = GenerateCodeBody::from_request(request);

        log::debug!(
            "POST {} (model: {}, prompt: {} chars)",
            url,
            request.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::remote_call(&url, e))?;

        if !response.status().is_success() {
            return Err(Error::remote_call(
                &url,
                format!("HTTP {}", response.status()),
            ));
        }

        let source_code = response
            .text()
            .await
            .map_err(|e| Error::remote_call(&url, format!("Failed to read body: {}", e)))?;

        Ok(GenerationResult { source_code })
    }

    /// `POST /generate-video`, returning the rendered video URL
    pub async fn render_code(&self, request: &RenderRequest) -> Result<RenderResult, Error> {
        let url = self.config.endpoint(GENERATE_VIDEO_PATH);
        let body = RenderBody::from_request(request);

        log::debug!("POST {} ({} code bytes)", url, body.code.len());

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::remote_call(&url, e))?;

        if !response.status().is_success() {
            return Err(Error::remote_call(
                &url,
                format!("HTTP {}", response.status()),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::remote_call(&url, format!("Failed to read body: {}", e)))?;

        parse_render_response(&text).map_err(|e| Error::remote_call(&url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genmanim_core::models::CodeModel;
    use mockito::{Matcher, Server};
    use serde_json::json;

    // ============================================================================
    // ServiceConfig tests
    // ============================================================================

    #[test]
    fn test_endpoint_join() {
        let config = ServiceConfig::new("http://localhost:3000/api");
        assert_eq!(
            config.endpoint(GENERATE_CODE_PATH),
            "http://localhost:3000/api/generate-code"
        );
    }

    #[test]
    fn test_endpoint_join_trailing_slash() {
        let config = ServiceConfig::new("http://localhost:3000/api/");
        assert_eq!(
            config.endpoint(GENERATE_VIDEO_PATH),
            "http://localhost:3000/api/generate-video"
        );
    }

    // ============================================================================
    // generate_code tests
    // ============================================================================

    #[tokio::test]
    async fn test_generate_code_returns_body_verbatim() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/generate-code")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "messages": [{ "role": "user", "content": "Draw a red circle" }]
            })))
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("  from manim import *\n\n```not trimmed```\n")
            .create_async()
            .await;

        let client = ServiceClient::new(ServiceConfig::new(server.url()));
        let request = GenerationRequest::new("Draw a red circle", CodeModel::Gpt4o);
        let result = client.generate_code(&request).await.unwrap();

        assert_eq!(result.source_code, "  from manim import *\n\n```not trimmed```\n");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_code_sends_selected_model() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/generate-code")
            .match_body(Matcher::PartialJson(json!({
                "model": "ft:gpt-3.5-turbo-1106:astronware:generative-manim-2:9OeVevto"
            })))
            .with_status(200)
            .with_body("print(1)")
            .create_async()
            .await;

        let client = ServiceClient::new(ServiceConfig::new(server.url()));
        let request = GenerationRequest::new("anything", CodeModel::FineTunedGpt35);
        client.generate_code(&request).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_code_non_success_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/generate-code")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let client = ServiceClient::new(ServiceConfig::new(server.url()));
        let request = GenerationRequest::new("Draw", CodeModel::Gpt4o);
        let err = client.generate_code(&request).await.unwrap_err();

        assert!(err.to_string().contains("HTTP 500"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_code_transport_error() {
        let client = ServiceClient::new(ServiceConfig::new("http://127.0.0.1:1"));
        let request = GenerationRequest::new("Draw", CodeModel::Gpt4o);
        let err = client.generate_code(&request).await.unwrap_err();

        assert!(matches!(err, Error::RemoteCall { .. }));
        assert!(err.to_string().contains("http://127.0.0.1:1/generate-code"));
    }

    // ============================================================================
    // render_code tests
    // ============================================================================

    #[tokio::test]
    async fn test_render_code_sends_empty_code() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/generate-video")
            .match_body(Matcher::Json(json!({ "code": "" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"video_url":"https://cdn.example.com/empty.mp4"}"#)
            .create_async()
            .await;

        let client = ServiceClient::new(ServiceConfig::new(server.url()));
        let result = client.render_code(&RenderRequest::new("")).await.unwrap();

        assert_eq!(result.video_url, "https://cdn.example.com/empty.mp4");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_render_code_malformed_payload() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/generate-video")
            .with_status(200)
            .with_body(r#"{"url":"missing the expected field"}"#)
            .create_async()
            .await;

        let client = ServiceClient::new(ServiceConfig::new(server.url()));
        let err = client
            .render_code(&RenderRequest::new("print(1)"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Malformed render response"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_render_code_non_success_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/generate-video")
            .with_status(422)
            .with_body(r#"{"video_url":"ignored"}"#)
            .create_async()
            .await;

        let client = ServiceClient::new(ServiceConfig::new(server.url()));
        let err = client
            .render_code(&RenderRequest::new("print(1)"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("HTTP 422"));
        mock.assert_async().await;
    }
}
