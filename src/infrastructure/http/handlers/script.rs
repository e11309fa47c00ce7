//! Script HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GenerateMasterclassScript, GenerateScript};
use crate::domain::script::UseCase;
use crate::domain::text_chunker::insert_pause_marks;
use crate::infrastructure::http::dto::{
    ApiResponse, FormatScriptRequest, GenerateMasterclassRequest, GenerateScriptRequest,
    ScriptResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成单任务解说脚本
pub async fn generate_script(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateScriptRequest>,
) -> Result<Json<ApiResponse<ScriptResponse>>, ApiError> {
    let command = GenerateScript {
        title: req.title,
        min_word_count: req.min_word_count,
        max_word_count: req.max_word_count,
        target_word_count: req.target_word_count,
        instructions: req.instructions,
    };

    let result = state.generate_script_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(ScriptResponse {
        script: result.script,
        word_count: result.word_count,
    })))
}

/// 生成多用例 Masterclass 脚本
pub async fn generate_masterclass(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateMasterclassRequest>,
) -> Result<Json<ApiResponse<ScriptResponse>>, ApiError> {
    let command = GenerateMasterclassScript {
        title: req.title,
        software_name: req.software_name,
        min_word_count: req.min_word_count,
        max_word_count: req.max_word_count,
        target_word_count: req.target_word_count,
        use_cases: req
            .use_cases
            .into_iter()
            .map(|u| UseCase {
                task_name: u.task_name,
                instructions: u.instructions,
            })
            .collect(),
    };

    let result = state.generate_masterclass_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(ScriptResponse {
        script: result.script,
        word_count: result.word_count,
    })))
}

/// 为脚本插入朗读停顿标记（纯文本变换，不经过外部服务）
pub async fn format_script(
    Json(req): Json<FormatScriptRequest>,
) -> Result<Json<ApiResponse<ScriptResponse>>, ApiError> {
    if req.script.trim().is_empty() {
        return Err(ApiError::BadRequest("No script to format".to_string()));
    }

    let formatted = insert_pause_marks(&req.script);
    let word_count = formatted.split_whitespace().count();

    Ok(Json(ApiResponse::success(ScriptResponse {
        script: formatted,
        word_count,
    })))
}
