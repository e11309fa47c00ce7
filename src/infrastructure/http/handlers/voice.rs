//! Voice HTTP Handlers

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::{GenerateVoice, SpeechProvider};
use crate::infrastructure::http::dto::GenerateVoiceRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成语音
///
/// 成功时返回二进制音频（WAV 或供应商已编码的格式），
/// 带下载用的 Content-Disposition 头
pub async fn generate_voice(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateVoiceRequest>,
) -> Result<Response, ApiError> {
    let provider = SpeechProvider::parse(&req.provider).ok_or_else(|| {
        ApiError::BadRequest("Invalid provider. Use 'elevenlabs' or 'gemini'".to_string())
    })?;

    let command = GenerateVoice {
        text: req.text,
        provider,
    };

    let result = state.generate_voice_handler.handle(command).await?;

    tracing::info!(
        provider = %provider.as_str(),
        segments = result.segments,
        audio_size = result.audio_data.len(),
        content_type = %result.content_type,
        "Voice response ready"
    );

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, result.audio_data.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"audio.{}\"", result.file_extension),
        )
        .body(Body::from(result.audio_data))
        .unwrap())
}
