//! Scriptcast - 解说脚本与语音合成服务
//!
//! 指令 → 解说脚本（外部 LLM） → 合成语音（外部 TTS，分块 + WAV 封装）

use std::collections::HashMap;
use std::sync::Arc;

use scriptcast::application::ports::{SpeechEnginePort, SpeechProvider};
use scriptcast::config::{load_config, print_config};
use scriptcast::infrastructure::adapters::{
    ElevenLabsClient, ElevenLabsClientConfig, GeminiLlmClient, GeminiLlmClientConfig,
    GeminiTtsClient, GeminiTtsClientConfig,
};
// use scriptcast::infrastructure::adapters::{FakeSpeechClient, FakeSpeechClientConfig};
use scriptcast::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},scriptcast={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Scriptcast - 解说脚本与语音合成服务");
    print_config(&config);

    // 创建 LLM 引擎
    let llm_config = GeminiLlmClientConfig {
        api_key: config.llm.api_key.clone(),
        model: config.llm.model.clone(),
        timeout_secs: config.llm.timeout_secs,
        ..Default::default()
    };
    let llm_engine = Arc::new(GeminiLlmClient::new(llm_config)?);

    // 创建语音引擎（按供应商注册）
    let gemini_tts_config = GeminiTtsClientConfig {
        api_key: config.tts.gemini.api_key.clone(),
        models: config.tts.gemini.models.clone(),
        voice_name: config.tts.gemini.voice_name.clone(),
        max_words_per_chunk: config.tts.gemini.max_words_per_chunk,
        timeout_secs: config.tts.gemini.timeout_secs,
        ..Default::default()
    };
    let elevenlabs_config = ElevenLabsClientConfig {
        api_key: config.tts.elevenlabs.api_key.clone(),
        voice_id: config.tts.elevenlabs.voice_id.clone(),
        model_id: config.tts.elevenlabs.model_id.clone(),
        timeout_secs: config.tts.elevenlabs.timeout_secs,
        ..Default::default()
    };

    let mut speech_engines: HashMap<SpeechProvider, Arc<dyn SpeechEnginePort>> = HashMap::new();
    speech_engines.insert(
        SpeechProvider::Gemini,
        Arc::new(GeminiTtsClient::new(gemini_tts_config)?),
    );
    speech_engines.insert(
        SpeechProvider::ElevenLabs,
        Arc::new(ElevenLabsClient::new(elevenlabs_config)?),
    );

    // // 使用 Fake 语音引擎（测试用，把提交文本的字节当作 PCM 返回）
    // let mut speech_engines: HashMap<SpeechProvider, Arc<dyn SpeechEnginePort>> = HashMap::new();
    // speech_engines.insert(
    //     SpeechProvider::Gemini,
    //     Arc::new(FakeSpeechClient::new(FakeSpeechClientConfig::default())),
    // );

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(llm_engine, speech_engines);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
