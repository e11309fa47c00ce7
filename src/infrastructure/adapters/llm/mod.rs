//! LLM Adapter - 文本生成客户端实现

mod fake_llm_client;
mod gemini_client;

pub use fake_llm_client::FakeLlmClient;
pub use gemini_client::{GeminiLlmClient, GeminiLlmClientConfig};
