//! Speech Engine Port - 语音合成引擎抽象
//!
//! 定义外部 TTS 服务的抽象接口。供应商分两类：
//! - 返回裸 PCM 采样的（需要再封装为 WAV 容器，且单次请求有词数上限）
//! - 返回已编码音频流的（直接透传给调用方）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::PcmFormat;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("API key not configured: {0}")]
    MissingApiKey(&'static str),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 候选模型全部失败（按序尝试，首个成功即返回）
    #[error("All {attempts} candidate models failed, last error: {last_error}")]
    AllCandidatesFailed { attempts: usize, last_error: String },
}

/// 语音供应商标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeechProvider {
    ElevenLabs,
    Gemini,
}

impl SpeechProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechProvider::ElevenLabs => "elevenlabs",
            SpeechProvider::Gemini => "gemini",
        }
    }

    /// 从请求字符串解析供应商
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "elevenlabs" => Some(SpeechProvider::ElevenLabs),
            "gemini" => Some(SpeechProvider::Gemini),
            _ => None,
        }
    }
}

/// 合成音频载荷
#[derive(Debug, Clone)]
pub enum SynthesizedAudio {
    /// 裸 PCM 采样，需要调用方封装为容器
    RawPcm { data: Vec<u8>, format: PcmFormat },
    /// 供应商已编码完成的音频，直接透传
    Encoded {
        data: Vec<u8>,
        content_type: String,
        file_extension: String,
    },
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// 要合成的文本（不超过引擎的单次请求词数上限）
    pub text: String,
}

/// 语音合成响应
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    pub audio: SynthesizedAudio,
}

/// Speech Engine Port
///
/// 外部语音合成服务的抽象接口
#[async_trait]
pub trait SpeechEnginePort: Send + Sync {
    /// 合成一段文本
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, TtsError>;

    /// 单次请求的安全词数上限
    ///
    /// `Some(limit)` 表示超长文本需要分块后逐段提交；
    /// `None` 表示全文一次提交
    fn max_words_per_request(&self) -> Option<usize>;

    /// 检查服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
