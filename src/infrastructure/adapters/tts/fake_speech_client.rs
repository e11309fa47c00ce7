//! Fake Speech Client - 用于测试的语音合成客户端
//!
//! 不实际调用 TTS 服务：裸 PCM 模式下把提交文本的字节当作 PCM 返回
//! （便于断言拼接顺序），并记录每次提交的文本；可配置在第 N 次调用
//! 时失败，或改为返回已编码载荷。

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{
    SpeechEnginePort, SpeechRequest, SpeechResponse, SynthesizedAudio, TtsError,
};
use crate::domain::audio::PcmFormat;

/// Fake Speech Client 配置
#[derive(Debug, Clone)]
pub struct FakeSpeechClientConfig {
    /// 返回的 PCM 采样格式
    pub format: PcmFormat,
    /// 单次请求词数上限（None 表示全文一次提交）
    pub max_words_per_request: Option<usize>,
    /// 第 N 次调用（从 1 计）返回服务错误
    pub fail_on_call: Option<usize>,
    /// 配置后改为返回已编码载荷 (data, content_type, file_extension)
    pub encoded: Option<(Vec<u8>, &'static str, &'static str)>,
}

impl Default for FakeSpeechClientConfig {
    fn default() -> Self {
        Self {
            format: PcmFormat::default(),
            max_words_per_request: Some(400),
            fail_on_call: None,
            encoded: None,
        }
    }
}

/// Fake Speech Client
pub struct FakeSpeechClient {
    config: FakeSpeechClientConfig,
    /// 调用计数
    calls: AtomicUsize,
    /// 提交文本记录
    submitted: Mutex<Vec<String>>,
}

impl FakeSpeechClient {
    pub fn new(config: FakeSpeechClientConfig) -> Self {
        Self {
            config,
            calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// 获取已提交文本的副本（按提交顺序）
    pub fn submitted_texts(&self) -> Vec<String> {
        self.submitted.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SpeechEnginePort for FakeSpeechClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, TtsError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(request.text.clone());
        }

        if self.config.fail_on_call == Some(call) {
            return Err(TtsError::ServiceError(format!(
                "Injected failure on call {}",
                call
            )));
        }

        if let Some((data, content_type, file_extension)) = &self.config.encoded {
            return Ok(SpeechResponse {
                audio: SynthesizedAudio::Encoded {
                    data: data.clone(),
                    content_type: (*content_type).to_string(),
                    file_extension: (*file_extension).to_string(),
                },
            });
        }

        Ok(SpeechResponse {
            audio: SynthesizedAudio::RawPcm {
                data: request.text.into_bytes(),
                format: self.config.format,
            },
        })
    }

    fn max_words_per_request(&self) -> Option<usize> {
        self.config.max_words_per_request
    }
}
