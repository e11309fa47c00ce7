//! Script Commands

use crate::domain::script::UseCase;

/// 生成单任务解说脚本命令
#[derive(Debug, Clone)]
pub struct GenerateScript {
    pub title: String,
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub target_word_count: usize,
    pub instructions: String,
}

/// 生成多用例 Masterclass 脚本命令
#[derive(Debug, Clone)]
pub struct GenerateMasterclassScript {
    pub title: String,
    pub software_name: String,
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub target_word_count: usize,
    pub use_cases: Vec<UseCase>,
}
