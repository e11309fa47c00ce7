//! Command Handlers

mod script_handlers;
mod voice_handlers;

pub use script_handlers::{
    GenerateMasterclassHandler, GenerateScriptHandler, ScriptGenerationResponse,
};
pub use voice_handlers::{GenerateVoiceHandler, GenerateVoiceResponse};
