//! Data Transfer Objects
//!
//! 对外 JSON 字段保持 camelCase（与原部署的前端契约一致）

use serde::{Deserialize, Serialize};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Script DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScriptRequest {
    pub title: String,
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub target_word_count: usize,
    pub instructions: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseDto {
    pub task_name: String,
    pub instructions: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMasterclassRequest {
    pub title: String,
    pub software_name: String,
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub target_word_count: usize,
    pub use_cases: Vec<UseCaseDto>,
}

#[derive(Debug, Deserialize)]
pub struct FormatScriptRequest {
    pub script: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptResponse {
    pub script: String,
    pub word_count: usize,
}

// ============================================================================
// Voice DTOs
// ============================================================================

fn default_provider() -> String {
    "gemini".to_string()
}

#[derive(Debug, Deserialize)]
pub struct GenerateVoiceRequest {
    pub text: String,
    /// 语音供应商："elevenlabs" 或 "gemini"
    #[serde(default = "default_provider")]
    pub provider: String,
}
