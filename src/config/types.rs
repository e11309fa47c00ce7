//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::infrastructure::adapters::DEFAULT_TTS_MODELS;

/// 应用主配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// LLM 文本生成配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// TTS 语音合成配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// LLM 文本生成配置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// API Key（亦可通过经典环境变量 GEMINI_API_KEY 注入）
    #[serde(default)]
    pub api_key: Option<String>,

    /// 文本生成模型
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_llm_model(),
            timeout_secs: default_timeout(),
        }
    }
}

/// TTS 语音合成配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TtsConfig {
    /// 裸 PCM 供应商（Gemini TTS）配置
    #[serde(default)]
    pub gemini: GeminiTtsConfig,

    /// 已编码供应商（ElevenLabs）配置
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,
}

/// Gemini TTS 配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiTtsConfig {
    /// API Key（默认复用 LLM 的 key / GEMINI_API_KEY）
    #[serde(default)]
    pub api_key: Option<String>,

    /// 候选模型列表（按尝试顺序）
    #[serde(default = "default_tts_models")]
    pub models: Vec<String>,

    /// 预置音色名
    #[serde(default = "default_voice_name")]
    pub voice_name: String,

    /// 单次请求的安全词数上限
    #[serde(default = "default_max_words_per_chunk")]
    pub max_words_per_chunk: usize,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_tts_models() -> Vec<String> {
    DEFAULT_TTS_MODELS.iter().map(|m| m.to_string()).collect()
}

fn default_voice_name() -> String {
    "Charon".to_string()
}

fn default_max_words_per_chunk() -> usize {
    400
}

impl Default for GeminiTtsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            models: default_tts_models(),
            voice_name: default_voice_name(),
            max_words_per_chunk: default_max_words_per_chunk(),
            timeout_secs: default_timeout(),
        }
    }
}

/// ElevenLabs 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ElevenLabsConfig {
    /// API Key（亦可通过经典环境变量 ELEVENLABS_API_KEY 注入）
    #[serde(default)]
    pub api_key: Option<String>,

    /// 音色 ID
    #[serde(default = "default_elevenlabs_voice_id")]
    pub voice_id: String,

    /// 合成模型 ID
    #[serde(default = "default_elevenlabs_model_id")]
    pub model_id: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_elevenlabs_voice_id() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string() // Rachel
}

fn default_elevenlabs_model_id() -> String {
    "eleven_flash_v2_5".to_string()
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            voice_id: default_elevenlabs_voice_id(),
            model_id: default_elevenlabs_model_id(),
            timeout_secs: default_timeout(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
