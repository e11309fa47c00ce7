//! TTS Adapter - 语音合成客户端实现

mod elevenlabs_client;
mod fake_speech_client;
mod gemini_tts_client;

pub use elevenlabs_client::{ElevenLabsClient, ElevenLabsClientConfig};
pub use fake_speech_client::{FakeSpeechClient, FakeSpeechClientConfig};
pub use gemini_tts_client::{GeminiTtsClient, GeminiTtsClientConfig, DEFAULT_TTS_MODELS};
