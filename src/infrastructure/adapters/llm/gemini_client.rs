//! Gemini LLM Client - 调用 Google Generative Language API
//!
//! 外部 API:
//! POST {base}/v1beta/models/{model}:generateContent?key={api_key}
//! Request: {"contents": [{"role": "user", "parts": [{"text": "..."}]}]}  (JSON)
//! Response: {"candidates": [{"content": {"parts": [{"text": "..."}]}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    GenerateTextRequest, GenerateTextResponse, LlmEnginePort, LlmError,
};

/// Gemini LLM 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiLlmClientConfig {
    /// API Key（未配置时每次请求返回服务错误）
    pub api_key: Option<String>,
    /// API 基础 URL
    pub base_url: String,
    /// 文本生成模型
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GeminiLlmClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 120,
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// 提取首个候选的全部文本片段
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let parts = candidate.content?.parts;

    let text: String = parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Gemini LLM 客户端
pub struct GeminiLlmClient {
    client: Client,
    config: GeminiLlmClientConfig,
}

impl GeminiLlmClient {
    /// 创建新的 Gemini LLM 客户端
    pub fn new(config: GeminiLlmClientConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取生成 URL（不含 key 参数，key 单独作为查询参数传入）
    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, model
        )
    }
}

#[async_trait]
impl LlmEnginePort for GeminiLlmClient {
    async fn generate(
        &self,
        request: GenerateTextRequest,
    ) -> Result<GenerateTextResponse, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(LlmError::MissingApiKey("GEMINI_API_KEY"))?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = request.prompt.len(),
            "Sending text generation request"
        );

        let response = self
            .client
            .post(self.generate_url(&self.config.model))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else if e.is_connect() {
                    LlmError::NetworkError(format!("Cannot connect to LLM service: {}", e))
                } else {
                    LlmError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = extract_text(parsed)
            .ok_or_else(|| LlmError::InvalidResponse("No text parts in response".to_string()))?;

        tracing::info!(
            model = %self.config.model,
            text_len = text.len(),
            "Text generation completed"
        );

        Ok(GenerateTextResponse {
            text,
            model: self.config.model.clone(),
        })
    }
}
