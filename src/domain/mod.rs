//! Domain Layer - 领域层
//!
//! 纯计算逻辑，无 I/O、无异步：
//! - text_chunker: 句子安全的词数分块 + 朗读停顿标记
//! - audio: PCM → WAV 容器封装
//! - script: 步骤计数与提示词组装

pub mod audio;
pub mod script;
pub mod text_chunker;

pub use audio::{pcm_to_wav, PcmFormat};
pub use text_chunker::{chunk_text, insert_pause_marks, ChunkConfig};
