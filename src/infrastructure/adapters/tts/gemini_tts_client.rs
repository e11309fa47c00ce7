//! Gemini TTS Client - 调用 Google Generative Language API 的语音输出
//!
//! 外部 API:
//! POST {base}/v1beta/models/{model}:generateContent?key={api_key}
//! Request 带 generationConfig.responseModalities = ["AUDIO"]
//! Response 的 inlineData 携带 base64 编码的裸 PCM（24kHz 单声道 16-bit）
//!
//! 候选模型按序尝试，首个成功即返回；全部失败时报告最后一个错误。

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::application::ports::{
    SpeechEnginePort, SpeechRequest, SpeechResponse, SynthesizedAudio, TtsError,
};
use crate::domain::audio::PcmFormat;
use crate::domain::text_chunker::DEFAULT_MAX_WORDS;

/// 默认候选模型（按尝试顺序）
pub const DEFAULT_TTS_MODELS: &[&str] = &[
    "gemini-2.5-flash-tts",
    "gemini-2.5-flash-preview-tts",
    "gemini-2.5-flash-lite-preview-tts",
];

/// 默认音色
pub const DEFAULT_VOICE_NAME: &str = "Charon";

/// Gemini TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiTtsClientConfig {
    /// API Key（未配置时每次请求返回服务错误）
    pub api_key: Option<String>,
    /// API 基础 URL
    pub base_url: String,
    /// 候选模型列表（按尝试顺序）
    pub models: Vec<String>,
    /// 预置音色名
    pub voice_name: String,
    /// 单次请求的安全词数上限
    pub max_words_per_chunk: usize,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GeminiTtsClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            models: DEFAULT_TTS_MODELS.iter().map(|m| m.to_string()).collect(),
            voice_name: DEFAULT_VOICE_NAME.to_string(),
            max_words_per_chunk: DEFAULT_MAX_WORDS,
            timeout_secs: 120,
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

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
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

/// 从响应中提取首个内联音频载荷（base64 原文与 MIME 类型）
fn extract_inline_audio(response: GenerateContentResponse) -> Option<(String, Option<String>)> {
    let candidate = response.candidates.into_iter().next()?;
    let parts = candidate.content?.parts;

    parts
        .into_iter()
        .filter_map(|part| part.inline_data)
        .map(|inline| (inline.data, inline.mime_type))
        .next()
}

/// Gemini TTS 客户端
pub struct GeminiTtsClient {
    client: Client,
    config: GeminiTtsClientConfig,
}

impl GeminiTtsClient {
    /// 创建新的 Gemini TTS 客户端
    pub fn new(config: GeminiTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取生成 URL
    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, model
        )
    }

    /// 向单个模型发起合成请求
    async fn synthesize_with_model(
        &self,
        model: &str,
        api_key: &str,
        text: &str,
    ) -> Result<Vec<u8>, TtsError> {
        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": text}]}],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": {"voiceName": self.config.voice_name}
                    }
                }
            }
        });

        let response = self
            .client
            .post(self.generate_url(model))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let (data, mime_type) = extract_inline_audio(parsed)
            .ok_or_else(|| TtsError::InvalidResponse("No inline audio in response".to_string()))?;

        let pcm = general_purpose::STANDARD
            .decode(data.as_bytes())
            .map_err(|e| TtsError::InvalidResponse(format!("Invalid base64 audio: {}", e)))?;

        tracing::debug!(
            model = %model,
            mime_type = ?mime_type,
            pcm_bytes = pcm.len(),
            "TTS model returned inline audio"
        );

        Ok(pcm)
    }
}

#[async_trait]
impl SpeechEnginePort for GeminiTtsClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, TtsError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(TtsError::MissingApiKey("GEMINI_API_KEY"))?;

        // 按序尝试候选模型，首个成功即返回
        let mut last_error: Option<TtsError> = None;

        for model in &self.config.models {
            match self
                .synthesize_with_model(model, api_key, &request.text)
                .await
            {
                Ok(pcm) => {
                    tracing::info!(
                        model = %model,
                        text_len = request.text.len(),
                        pcm_bytes = pcm.len(),
                        "TTS synthesis completed"
                    );
                    return Ok(SpeechResponse {
                        audio: SynthesizedAudio::RawPcm {
                            data: pcm,
                            format: PcmFormat::default(),
                        },
                    });
                }
                Err(err) => {
                    tracing::warn!(model = %model, error = %err, "TTS model failed, trying next");
                    last_error = Some(err);
                }
            }
        }

        Err(TtsError::AllCandidatesFailed {
            attempts: self.config.models.len(),
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no candidate models configured".to_string()),
        })
    }

    fn max_words_per_request(&self) -> Option<usize> {
        Some(self.config.max_words_per_chunk)
    }
}
