//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（前缀 `SCRIPTCAST_`，层级分隔符 `__`）
//! 2. 配置文件（config.toml）
//! 3. 默认值
//!
//! 另外兼容原部署的经典环境变量：GEMINI_API_KEY、ELEVENLABS_API_KEY、
//! ELEVENLABS_VOICE_ID。它们仅在对应字段尚未配置时生效。

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `SCRIPTCAST_SERVER__HOST=127.0.0.1`
/// - `SCRIPTCAST_SERVER__PORT=8080`
/// - `SCRIPTCAST_LLM__MODEL=gemini-2.5-flash`
/// - `SCRIPTCAST_TTS__GEMINI__VOICE_NAME=Charon`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("llm.model", "gemini-2.5-flash")?
        .set_default("llm.timeout_secs", 120)?
        .set_default("tts.gemini.voice_name", "Charon")?
        .set_default("tts.gemini.max_words_per_chunk", 400)?
        .set_default("tts.gemini.timeout_secs", 120)?
        .set_default("tts.elevenlabs.voice_id", "21m00Tcm4TlvDq8ikWAM")?
        .set_default("tts.elevenlabs.model_id", "eleven_flash_v2_5")?
        .set_default("tts.elevenlabs.timeout_secs", 120)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: SCRIPTCAST_
    // 层级分隔符: __ (双下划线)
    // 例如: SCRIPTCAST_LLM__API_KEY=xxx
    builder = builder.add_source(
        Environment::with_prefix("SCRIPTCAST")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let mut app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 叠加经典供应商环境变量
    apply_provider_env(&mut app_config);

    // 7. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 叠加原部署使用的经典环境变量（仅填充尚未配置的字段）
fn apply_provider_env(config: &mut AppConfig) {
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            config.llm.api_key.get_or_insert_with(|| key.clone());
            config.tts.gemini.api_key.get_or_insert(key);
        }
    }

    if let Ok(key) = std::env::var("ELEVENLABS_API_KEY") {
        if !key.is_empty() {
            config.tts.elevenlabs.api_key.get_or_insert(key);
        }
    }

    if let Ok(voice_id) = std::env::var("ELEVENLABS_VOICE_ID") {
        if !voice_id.is_empty() {
            config.tts.elevenlabs.voice_id = voice_id;
        }
    }

    // LLM 与 Gemini TTS 共用一个 key，单边配置时补齐另一边
    if config.tts.gemini.api_key.is_none() {
        config.tts.gemini.api_key = config.llm.api_key.clone();
    }
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证端口范围
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 验证 LLM 模型
    if config.llm.model.is_empty() {
        return Err(ConfigError::ValidationError(
            "LLM model cannot be empty".to_string(),
        ));
    }

    // 验证 TTS 候选模型列表
    if config.tts.gemini.models.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS candidate model list cannot be empty".to_string(),
        ));
    }

    // 验证分块词数上限
    if config.tts.gemini.max_words_per_chunk == 0 {
        return Err(ConfigError::ValidationError(
            "Max words per chunk cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志，不输出密钥内容）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("LLM Model: {}", config.llm.model);
    tracing::info!("LLM API Key Set: {}", config.llm.api_key.is_some());
    tracing::info!("TTS Candidate Models: {:?}", config.tts.gemini.models);
    tracing::info!("TTS Voice: {}", config.tts.gemini.voice_name);
    tracing::info!(
        "TTS Max Words Per Chunk: {}",
        config.tts.gemini.max_words_per_chunk
    );
    tracing::info!(
        "ElevenLabs API Key Set: {}",
        config.tts.elevenlabs.api_key.is_some()
    );
    tracing::info!("ElevenLabs Voice: {}", config.tts.elevenlabs.voice_id);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
