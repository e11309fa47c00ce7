//! Fake LLM Client - 用于测试的文本生成客户端
//!
//! 始终返回固定文本，并记录收到的提示词，不实际调用外部服务

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::ports::{
    GenerateTextRequest, GenerateTextResponse, LlmEnginePort, LlmError,
};

/// Fake LLM Client
pub struct FakeLlmClient {
    /// 固定返回的文本
    response_text: String,
    /// 收到的提示词记录
    prompts: Mutex<Vec<String>>,
}

impl FakeLlmClient {
    pub fn new(response_text: impl Into<String>) -> Self {
        Self {
            response_text: response_text.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// 获取已收到的提示词副本
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmEnginePort for FakeLlmClient {
    async fn generate(
        &self,
        request: GenerateTextRequest,
    ) -> Result<GenerateTextResponse, LlmError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(request.prompt);
        }

        Ok(GenerateTextResponse {
            text: self.response_text.clone(),
            model: "fake".to_string(),
        })
    }
}
