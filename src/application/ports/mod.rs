//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod llm_engine;
mod speech_engine;

pub use llm_engine::{GenerateTextRequest, GenerateTextResponse, LlmEnginePort, LlmError};
pub use speech_engine::{
    SpeechEnginePort, SpeechProvider, SpeechRequest, SpeechResponse, SynthesizedAudio, TtsError,
};
