//! 应用层 - 命令
//!
//! 处理所有写操作（脚本生成、语音合成）

mod script_commands;
mod voice_commands;

pub mod handlers;

pub use script_commands::*;
pub use voice_commands::*;
