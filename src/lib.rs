//! Scriptcast - 解说脚本与语音合成服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - text_chunker: 句子安全的词数分块 + 朗读停顿标记
//! - audio: PCM → WAV 容器封装
//! - script: 步骤计数与提示词组装
//!
//! 应用层 (application/):
//! - Ports: 端口定义（LlmEngine, SpeechEngine）
//! - Commands: 命令处理器（脚本生成、语音合成编排）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: Gemini LLM/TTS Client, ElevenLabs Client

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
