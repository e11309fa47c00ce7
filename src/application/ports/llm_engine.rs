//! LLM Engine Port - 文本生成引擎抽象
//!
//! 定义外部大语言模型服务的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// LLM 错误
#[derive(Debug, Error)]
pub enum LlmError {
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
}

/// 文本生成请求
#[derive(Debug, Clone)]
pub struct GenerateTextRequest {
    /// 完整的提示词
    pub prompt: String,
}

/// 文本生成响应
#[derive(Debug, Clone)]
pub struct GenerateTextResponse {
    /// 生成的文本
    pub text: String,
    /// 实际使用的模型（用于日志和追踪）
    pub model: String,
}

/// LLM Engine Port
///
/// 外部文本生成服务的抽象接口
#[async_trait]
pub trait LlmEnginePort: Send + Sync {
    /// 根据提示词生成文本
    async fn generate(&self, request: GenerateTextRequest)
        -> Result<GenerateTextResponse, LlmError>;

    /// 检查服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
