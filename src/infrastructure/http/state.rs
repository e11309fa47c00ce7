//! Application State
//!
//! 包含所有 Command Handlers 的应用状态

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::{
    // Command handlers
    GenerateMasterclassHandler, GenerateScriptHandler, GenerateVoiceHandler,
    // Ports
    LlmEnginePort, SpeechEnginePort, SpeechProvider,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub llm_engine: Arc<dyn LlmEnginePort>,
    pub speech_engines: HashMap<SpeechProvider, Arc<dyn SpeechEnginePort>>,

    // ========== Command Handlers ==========
    pub generate_script_handler: GenerateScriptHandler,
    pub generate_masterclass_handler: GenerateMasterclassHandler,
    pub generate_voice_handler: GenerateVoiceHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        llm_engine: Arc<dyn LlmEnginePort>,
        speech_engines: HashMap<SpeechProvider, Arc<dyn SpeechEnginePort>>,
    ) -> Self {
        Self {
            // Command handlers
            generate_script_handler: GenerateScriptHandler::new(llm_engine.clone()),
            generate_masterclass_handler: GenerateMasterclassHandler::new(llm_engine.clone()),
            generate_voice_handler: GenerateVoiceHandler::new(speech_engines.clone()),

            // Ports
            llm_engine,
            speech_engines,
        }
    }
}
