//! Script Command Handlers

use std::sync::Arc;

use crate::application::commands::{GenerateMasterclassScript, GenerateScript};
use crate::application::error::ApplicationError;
use crate::application::ports::{GenerateTextRequest, LlmEnginePort};
use crate::domain::script::{
    build_masterclass_prompt, build_script_prompt, count_steps, MasterclassRequest, ScriptRequest,
};

/// Masterclass 用例数量限制
const MIN_USE_CASES: usize = 2;
const MAX_USE_CASES: usize = 8;

/// 脚本生成响应
#[derive(Debug, Clone)]
pub struct ScriptGenerationResponse {
    /// 生成的脚本全文
    pub script: String,
    /// 脚本实际词数
    pub word_count: usize,
    /// 实际使用的模型
    pub model: String,
}

// ============================================================================
// GenerateScript
// ============================================================================

/// GenerateScript Handler
pub struct GenerateScriptHandler {
    llm_engine: Arc<dyn LlmEnginePort>,
}

impl GenerateScriptHandler {
    pub fn new(llm_engine: Arc<dyn LlmEnginePort>) -> Self {
        Self { llm_engine }
    }

    pub async fn handle(
        &self,
        command: GenerateScript,
    ) -> Result<ScriptGenerationResponse, ApplicationError> {
        if command.title.trim().is_empty() {
            return Err(ApplicationError::validation("Title is required"));
        }
        if command.instructions.trim().is_empty() {
            return Err(ApplicationError::validation("Instructions are required"));
        }
        if command.target_word_count == 0 {
            return Err(ApplicationError::validation(
                "Target word count must be positive",
            ));
        }

        let steps = count_steps(&command.instructions);
        let prompt = build_script_prompt(&ScriptRequest {
            title: command.title.clone(),
            min_word_count: command.min_word_count,
            max_word_count: command.max_word_count,
            target_word_count: command.target_word_count,
            instructions: command.instructions,
        });

        let result = self
            .llm_engine
            .generate(GenerateTextRequest { prompt })
            .await?;

        let word_count = result.text.split_whitespace().count();

        tracing::info!(
            title = %command.title,
            steps = steps,
            target = command.target_word_count,
            word_count = word_count,
            model = %result.model,
            "Script generated"
        );

        Ok(ScriptGenerationResponse {
            script: result.text,
            word_count,
            model: result.model,
        })
    }
}

// ============================================================================
// GenerateMasterclassScript
// ============================================================================

/// GenerateMasterclassScript Handler
pub struct GenerateMasterclassHandler {
    llm_engine: Arc<dyn LlmEnginePort>,
}

impl GenerateMasterclassHandler {
    pub fn new(llm_engine: Arc<dyn LlmEnginePort>) -> Self {
        Self { llm_engine }
    }

    pub async fn handle(
        &self,
        command: GenerateMasterclassScript,
    ) -> Result<ScriptGenerationResponse, ApplicationError> {
        if command.title.trim().is_empty() || command.software_name.trim().is_empty() {
            return Err(ApplicationError::validation(
                "Title and software name are required",
            ));
        }
        if command.use_cases.len() < MIN_USE_CASES || command.use_cases.len() > MAX_USE_CASES {
            return Err(ApplicationError::validation(format!(
                "Use cases must be between {} and {}",
                MIN_USE_CASES, MAX_USE_CASES
            )));
        }
        if command
            .use_cases
            .iter()
            .any(|u| u.task_name.trim().is_empty() || u.instructions.trim().is_empty())
        {
            return Err(ApplicationError::validation(
                "Each use case must have a task name and instructions",
            ));
        }
        if command.target_word_count == 0 {
            return Err(ApplicationError::validation(
                "Target word count must be positive",
            ));
        }

        let use_case_count = command.use_cases.len();
        let prompt = build_masterclass_prompt(&MasterclassRequest {
            title: command.title.clone(),
            software_name: command.software_name.clone(),
            min_word_count: command.min_word_count,
            max_word_count: command.max_word_count,
            target_word_count: command.target_word_count,
            use_cases: command.use_cases,
        });

        let result = self
            .llm_engine
            .generate(GenerateTextRequest { prompt })
            .await?;

        let word_count = result.text.split_whitespace().count();

        tracing::info!(
            title = %command.title,
            software = %command.software_name,
            use_cases = use_case_count,
            word_count = word_count,
            model = %result.model,
            "Masterclass script generated"
        );

        Ok(ScriptGenerationResponse {
            script: result.text,
            word_count,
            model: result.model,
        })
    }
}
