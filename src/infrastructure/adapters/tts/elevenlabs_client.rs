//! ElevenLabs TTS Client - 调用 ElevenLabs Text-to-Speech API
//!
//! 外部 API:
//! POST {base}/v1/text-to-speech/{voice_id}
//! Headers: xi-api-key, Accept: audio/mpeg
//! Request: {"text": "...", "model_id": "...", "voice_settings": {...}}  (JSON)
//! Response: 已编码的 MPEG 音频流，直接透传（无需 PCM 封装）

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{
    SpeechEnginePort, SpeechRequest, SpeechResponse, SynthesizedAudio, TtsError,
};

/// 默认音色 ID（Rachel）
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

/// 默认合成模型
pub const DEFAULT_MODEL_ID: &str = "eleven_flash_v2_5";

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    /// API Key（未配置时每次请求返回服务错误）
    pub api_key: Option<String>,
    /// API 基础 URL
    pub base_url: String,
    /// 音色 ID
    pub voice_id: String,
    /// 合成模型 ID
    pub model_id: String,
    /// 音色稳定度
    pub stability: f32,
    /// 相似度增强
    pub similarity_boost: f32,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.elevenlabs.io".to_string(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            stability: 0.5,
            similarity_boost: 0.5,
            timeout_secs: 120,
        }
    }
}

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SynthesisRequestBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// ElevenLabs TTS 客户端
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsClient {
    /// 创建新的 ElevenLabs 客户端
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn synthesis_url(&self) -> String {
        format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url, self.config.voice_id
        )
    }
}

#[async_trait]
impl SpeechEnginePort for ElevenLabsClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, TtsError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(TtsError::MissingApiKey("ELEVENLABS_API_KEY"))?;

        let body = SynthesisRequestBody {
            text: &request.text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        };

        tracing::debug!(
            voice_id = %self.config.voice_id,
            model_id = %self.config.model_id,
            text_len = request.text.len(),
            "Sending TTS synthesis request"
        );

        let response = self
            .client
            .post(self.synthesis_url())
            .header("xi-api-key", api_key)
            .header("Accept", "audio/mpeg")
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

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::info!(
            voice_id = %self.config.voice_id,
            audio_size = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(SpeechResponse {
            audio: SynthesizedAudio::Encoded {
                data: audio_data,
                content_type: "audio/mpeg".to_string(),
                file_extension: "mp3".to_string(),
            },
        })
    }

    /// 全文一次提交，由供应商自行处理长文本
    fn max_words_per_request(&self) -> Option<usize> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ElevenLabsClientConfig::default();
        assert_eq!(config.base_url, "https://api.elevenlabs.io");
        assert_eq!(config.voice_id, "21m00Tcm4TlvDq8ikWAM");
        assert_eq!(config.model_id, "eleven_flash_v2_5");
    }

    #[test]
    fn test_synthesis_url() {
        let client = ElevenLabsClient::new(ElevenLabsClientConfig::default()).unwrap();
        assert_eq!(
            client.synthesis_url(),
            "https://api.elevenlabs.io/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"
        );
    }

    #[test]
    fn test_request_body_serialization() {
        let body = SynthesisRequestBody {
            text: "hello",
            model_id: "eleven_flash_v2_5",
            voice_settings: VoiceSettings {
                stability: 0.5,
                similarity_boost: 0.5,
            },
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["text"], "hello");
        assert_eq!(json["model_id"], "eleven_flash_v2_5");
        assert_eq!(json["voice_settings"]["stability"], 0.5);
        assert_eq!(json["voice_settings"]["similarity_boost"], 0.5);
    }

    #[test]
    fn test_no_chunking_limit() {
        let client = ElevenLabsClient::new(ElevenLabsClientConfig::default()).unwrap();
        assert_eq!(client.max_words_per_request(), None);
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = ElevenLabsClient::new(ElevenLabsClientConfig::default()).unwrap();
        let err = client
            .synthesize(SpeechRequest {
                text: "hi".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::MissingApiKey("ELEVENLABS_API_KEY")));
    }
}
