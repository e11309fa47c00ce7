//! Voice Command Handlers
//!
//! 多段合成编排：分块 → 按输入顺序逐段合成 → 全量拼接 → 一次封装。
//! 任一段失败即整个请求失败，不产出部分结果。

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::commands::GenerateVoice;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    SpeechEnginePort, SpeechProvider, SpeechRequest, SynthesizedAudio,
};
use crate::domain::audio::{pcm_to_wav, PcmFormat};
use crate::domain::text_chunker::{chunk_text, ChunkConfig};

/// 生成语音响应
#[derive(Debug, Clone)]
pub struct GenerateVoiceResponse {
    /// 可直接下载/播放的音频字节
    pub audio_data: Vec<u8>,
    /// MIME 类型
    pub content_type: String,
    /// 下载文件扩展名
    pub file_extension: String,
    /// 实际提交给合成服务的分段数
    pub segments: usize,
}

/// GenerateVoice Handler
pub struct GenerateVoiceHandler {
    speech_engines: HashMap<SpeechProvider, Arc<dyn SpeechEnginePort>>,
}

impl GenerateVoiceHandler {
    pub fn new(speech_engines: HashMap<SpeechProvider, Arc<dyn SpeechEnginePort>>) -> Self {
        Self { speech_engines }
    }

    pub async fn handle(
        &self,
        command: GenerateVoice,
    ) -> Result<GenerateVoiceResponse, ApplicationError> {
        let text = command.text.trim();
        if text.is_empty() {
            return Err(ApplicationError::validation(
                "Text is empty: nothing to synthesize",
            ));
        }

        let engine = self.speech_engines.get(&command.provider).ok_or_else(|| {
            ApplicationError::validation(format!(
                "No speech engine registered for provider '{}'",
                command.provider.as_str()
            ))
        })?;

        match engine.max_words_per_request() {
            Some(max_words) => self.synthesize_chunked(engine.as_ref(), text, max_words).await,
            None => self.synthesize_whole(engine.as_ref(), text).await,
        }
    }

    /// 全文一次提交（供应商无词数上限）
    async fn synthesize_whole(
        &self,
        engine: &dyn SpeechEnginePort,
        text: &str,
    ) -> Result<GenerateVoiceResponse, ApplicationError> {
        let response = engine
            .synthesize(SpeechRequest {
                text: text.to_string(),
            })
            .await?;

        Ok(into_voice_response(response.audio, 1))
    }

    /// 分块提交：逐段合成，按序拼接 PCM，最后一次封装为 WAV
    async fn synthesize_chunked(
        &self,
        engine: &dyn SpeechEnginePort,
        text: &str,
        max_words: usize,
    ) -> Result<GenerateVoiceResponse, ApplicationError> {
        let segments = chunk_text(text, &ChunkConfig { max_words });
        if segments.is_empty() {
            return Err(ApplicationError::validation(
                "Text is empty: nothing to synthesize",
            ));
        }

        let total = segments.len();
        let mut pcm: Vec<u8> = Vec::new();
        let mut format: Option<PcmFormat> = None;

        for (index, segment) in segments.iter().enumerate() {
            tracing::debug!(
                index = index,
                total = total,
                words = segment.split_whitespace().count(),
                "Synthesizing segment"
            );

            let response = engine
                .synthesize(SpeechRequest {
                    text: segment.clone(),
                })
                .await?;

            match response.audio {
                SynthesizedAudio::RawPcm { data, format: f } => {
                    // 同一请求内各段格式一致由供应商保证，头部采用首段格式
                    format.get_or_insert(f);
                    pcm.extend_from_slice(&data);
                }
                audio @ SynthesizedAudio::Encoded { .. } if total == 1 => {
                    return Ok(into_voice_response(audio, 1));
                }
                SynthesizedAudio::Encoded { .. } => {
                    return Err(ApplicationError::invalid_state(
                        "Provider returned encoded audio for a chunked request",
                    ));
                }
            }
        }

        let format = format.unwrap_or_default();
        let wav = pcm_to_wav(&pcm, format);

        tracing::info!(
            segments = total,
            pcm_bytes = pcm.len(),
            wav_bytes = wav.len(),
            "Voice generated"
        );

        Ok(GenerateVoiceResponse {
            audio_data: wav,
            content_type: "audio/wav".to_string(),
            file_extension: "wav".to_string(),
            segments: total,
        })
    }
}

/// 将端口返回的音频载荷转为响应（裸 PCM 封装为 WAV，已编码的透传）
fn into_voice_response(audio: SynthesizedAudio, segments: usize) -> GenerateVoiceResponse {
    match audio {
        SynthesizedAudio::RawPcm { data, format } => GenerateVoiceResponse {
            audio_data: pcm_to_wav(&data, format),
            content_type: "audio/wav".to_string(),
            file_extension: "wav".to_string(),
            segments,
        },
        SynthesizedAudio::Encoded {
            data,
            content_type,
            file_extension,
        } => GenerateVoiceResponse {
            audio_data: data,
            content_type,
            file_extension,
            segments,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::WAV_HEADER_SIZE;
    use crate::infrastructure::adapters::{FakeSpeechClient, FakeSpeechClientConfig};

    fn handler_with(engine: FakeSpeechClient) -> (GenerateVoiceHandler, Arc<FakeSpeechClient>) {
        let engine = Arc::new(engine);
        let mut engines: HashMap<SpeechProvider, Arc<dyn SpeechEnginePort>> = HashMap::new();
        engines.insert(SpeechProvider::Gemini, engine.clone());
        (GenerateVoiceHandler::new(engines), engine)
    }

    fn pcm_command(text: &str) -> GenerateVoice {
        GenerateVoice {
            text: text.to_string(),
            provider: SpeechProvider::Gemini,
        }
    }

    #[tokio::test]
    async fn test_chunked_synthesis_concatenates_in_order() {
        // 每句 3 词、上限 3 → 每句一个分段
        let config = FakeSpeechClientConfig {
            max_words_per_request: Some(3),
            ..Default::default()
        };
        let (handler, engine) = handler_with(FakeSpeechClient::new(config));

        let result = handler
            .handle(pcm_command("One two three. Four five six. Seven eight nine."))
            .await
            .unwrap();

        assert_eq!(result.segments, 3);
        assert_eq!(result.content_type, "audio/wav");
        assert_eq!(
            engine.submitted_texts(),
            vec![
                "One two three.",
                "Four five six.",
                "Seven eight nine.",
            ]
        );

        // WAV 载荷等于各段 PCM（= 段文本字节）按序拼接
        let expected: Vec<u8> = b"One two three.Four five six.Seven eight nine.".to_vec();
        assert_eq!(&result.audio_data[WAV_HEADER_SIZE..], expected.as_slice());
        assert_eq!(&result.audio_data[0..4], b"RIFF");
    }

    #[tokio::test]
    async fn test_chunk_failure_fails_whole_request() {
        let config = FakeSpeechClientConfig {
            max_words_per_request: Some(1),
            fail_on_call: Some(2),
            ..Default::default()
        };
        let (handler, engine) = handler_with(FakeSpeechClient::new(config));

        let err = handler
            .handle(pcm_command("First. Second. Third."))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ExternalServiceError(_)));
        // 失败发生在第二段，第三段不再提交
        assert_eq!(engine.submitted_texts().len(), 2);
    }

    #[tokio::test]
    async fn test_encoded_provider_passthrough() {
        let config = FakeSpeechClientConfig {
            max_words_per_request: None,
            encoded: Some((b"mp3-bytes".to_vec(), "audio/mpeg", "mp3")),
            ..Default::default()
        };
        let (handler, _) = handler_with(FakeSpeechClient::new(config));

        let result = handler
            .handle(pcm_command("Any text at all."))
            .await
            .unwrap();

        assert_eq!(result.audio_data, b"mp3-bytes");
        assert_eq!(result.content_type, "audio/mpeg");
        assert_eq!(result.file_extension, "mp3");
        assert_eq!(result.segments, 1);
    }

    #[tokio::test]
    async fn test_empty_text_is_validation_error() {
        let (handler, engine) = handler_with(FakeSpeechClient::new(Default::default()));

        let err = handler.handle(pcm_command("   \n ")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert!(engine.submitted_texts().is_empty());
    }

    #[tokio::test]
    async fn test_unregistered_provider_is_validation_error() {
        let (handler, _) = handler_with(FakeSpeechClient::new(Default::default()));

        let err = handler
            .handle(GenerateVoice {
                text: "Hello.".to_string(),
                provider: SpeechProvider::ElevenLabs,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_single_segment_uses_pcm_format_from_engine() {
        let config = FakeSpeechClientConfig {
            max_words_per_request: Some(400),
            format: PcmFormat {
                sample_rate: 24_000,
                channels: 1,
                bits_per_sample: 16,
            },
            ..Default::default()
        };
        let (handler, _) = handler_with(FakeSpeechClient::new(config));

        let result = handler.handle(pcm_command("Short text.")).await.unwrap();

        assert_eq!(result.segments, 1);
        // 采样率字段位于头部偏移 24
        assert_eq!(
            u32::from_le_bytes([
                result.audio_data[24],
                result.audio_data[25],
                result.audio_data[26],
                result.audio_data[27],
            ]),
            24_000
        );
    }
}
