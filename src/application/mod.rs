//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（LlmEngine、SpeechEngine）
//! - commands: 命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    // Script commands
    GenerateMasterclassScript,
    GenerateScript,
    // Voice commands
    GenerateVoice,
    // Handlers
    handlers::{
        GenerateMasterclassHandler, GenerateScriptHandler, GenerateVoiceHandler,
        GenerateVoiceResponse, ScriptGenerationResponse,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // LLM engine
    GenerateTextRequest,
    GenerateTextResponse,
    LlmEnginePort,
    LlmError,
    // Speech engine
    SpeechEnginePort,
    SpeechProvider,
    SpeechRequest,
    SpeechResponse,
    SynthesizedAudio,
    TtsError,
};
