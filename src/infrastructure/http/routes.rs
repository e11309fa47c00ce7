//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping                GET   健康检查
//! - /api/script/generate     POST  指令 → 解说脚本
//! - /api/script/masterclass  POST  多用例指令 → Masterclass 脚本
//! - /api/script/format       POST  脚本插入朗读停顿标记
//! - /api/voice/generate      POST  脚本 → 合成音频（二进制响应）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/script", script_routes())
        .nest("/voice", voice_routes())
}

/// Script 路由
fn script_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(handlers::generate_script))
        .route("/masterclass", post(handlers::generate_masterclass))
        .route("/format", post(handlers::format_script))
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new().route("/generate", post(handlers::generate_voice))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{SpeechEnginePort, SpeechProvider};
    use crate::infrastructure::adapters::{
        FakeLlmClient, FakeSpeechClient, FakeSpeechClientConfig,
    };
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::collections::HashMap;
    use tower::util::ServiceExt;

    fn create_test_router() -> Router {
        let llm_engine = Arc::new(FakeLlmClient::new("generated script words here"));

        let mut speech_engines: HashMap<SpeechProvider, Arc<dyn SpeechEnginePort>> =
            HashMap::new();
        speech_engines.insert(
            SpeechProvider::Gemini,
            Arc::new(FakeSpeechClient::new(FakeSpeechClientConfig::default())),
        );

        let state = AppState::new(llm_engine, speech_engines);
        create_routes().with_state(Arc::new(state))
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let app = create_test_router();
        let request = Request::builder()
            .uri("/api/ping")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generate_script_returns_envelope() {
        let app = create_test_router();
        let request = json_request(
            "/api/script/generate",
            r#"{"title": "how to test", "minWordCount": 100, "maxWordCount": 200,
                "targetWordCount": 150, "instructions": "1. Write\n2. Run"}"#,
        );

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["errno"], 0);
        assert_eq!(parsed["data"]["script"], "generated script words here");
        assert_eq!(parsed["data"]["wordCount"], 4);
    }

    #[tokio::test]
    async fn test_generate_voice_returns_wav_attachment() {
        let app = create_test_router();
        let request = json_request(
            "/api/voice/generate",
            r#"{"text": "Hello there. General greeting.", "provider": "gemini"}"#,
        );

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "audio/wav"
        );
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_DISPOSITION)
                .unwrap(),
            "attachment; filename=\"audio.wav\""
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[0..4], b"RIFF");
    }

    #[tokio::test]
    async fn test_generate_voice_invalid_provider() {
        let app = create_test_router();
        let request = json_request(
            "/api/voice/generate",
            r#"{"text": "Hello.", "provider": "nonexistent"}"#,
        );

        let response = app.oneshot(request).await.unwrap();
        // 业务错误统一走 errno 信封
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["errno"], 400);
    }

    #[tokio::test]
    async fn test_format_script() {
        let app = create_test_router();
        let request = json_request(
            "/api/script/format",
            r#"{"script": "First sentence. Second sentence!"}"#,
        );

        let response = app.oneshot(request).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            parsed["data"]["script"],
            "First sentence.\n...\nSecond sentence!"
        );
    }
}
