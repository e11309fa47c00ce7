//! Voice Commands

use crate::application::ports::SpeechProvider;

/// 生成语音命令
#[derive(Debug, Clone)]
pub struct GenerateVoice {
    /// 要合成的脚本全文
    pub text: String,
    /// 语音供应商
    pub provider: SpeechProvider,
}
