//! 文本分块器
//!
//! 将长文本切分为不跨句、带词数上限的片段，用于适配语音合成服务的
//! 单次请求限制。同时提供朗读停顿标记格式化。

/// 默认单片段最大词数
/// 超过此限制的文本需要分多次提交给语音合成服务
pub const DEFAULT_MAX_WORDS: usize = 400;

/// 分块配置
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// 单片段最大词数（软上限，超长单句不会被拆开）
    pub max_words: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
        }
    }
}

/// 检查是否为句末标点
#[inline]
fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// 归一化空白：所有空白串（含换行）折叠为单个空格，并去除首尾空白
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 统计词数（按空白分隔）
#[inline]
fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 按句子边界分割已归一化的文本
///
/// 边界规则：句末标点（`.` `!` `?`）后跟空白处分割。归一化后空白
/// 只剩单个空格，因此换行本身不构成边界。输入末尾的剩余内容作为
/// 最后一句。空句（trim 后）被丢弃。
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);

        if is_sentence_terminator(ch) && chars.peek() == Some(&' ') {
            chars.next(); // 消费分隔空格
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    // 剩余内容
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

/// 将文本切分为词数不超过 `max_words` 的片段
///
/// 分块策略：
/// 1. 归一化空白后按句子边界分割
/// 2. 向当前片段累积句子；加入下一句会超过词数上限且当前片段非空时，
///    关闭当前片段（句子以单个空格连接）并另起新片段
/// 3. 单句超过上限时独占一个片段，不会被拆到句中
///
/// 空输入（或只含空白的输入）返回空序列。纯函数，无副作用。
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<String> {
    let normalized = normalize_whitespace(text);
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut segments: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_words = 0;

    for sentence in split_sentences(&normalized) {
        let words = word_count(&sentence);

        if !current.is_empty() && current_words + words > config.max_words {
            segments.push(current.join(" "));
            current.clear();
            current_words = 0;
        }

        current_words += words;
        current.push(sentence);
    }

    if !current.is_empty() {
        segments.push(current.join(" "));
    }

    segments
}

/// 使用默认配置分块（便捷方法）
pub fn chunk_text_default(text: &str) -> Vec<String> {
    chunk_text(text, &ChunkConfig::default())
}

/// 朗读停顿标记行
const PAUSE_MARK: &str = "\n...\n";

/// 为脚本插入朗读停顿标记
///
/// 处理步骤：
/// 1. 归一化空白
/// 2. 每个"句末标点 + 空格"替换为"句末标点 + 停顿行"
/// 3. 折叠紧邻的重复停顿行，去除首尾空白
pub fn insert_pause_marks(text: &str) -> String {
    let normalized = normalize_whitespace(text);

    let mut formatted = String::with_capacity(normalized.len());
    let mut chars = normalized.chars().peekable();

    while let Some(ch) = chars.next() {
        formatted.push(ch);

        if is_sentence_terminator(ch) && chars.peek() == Some(&' ') {
            chars.next();
            formatted.push_str(PAUSE_MARK);
        }
    }

    formatted
        .replace("\n...\n...\n", PAUSE_MARK)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_no_segments() {
        assert!(chunk_text("", &ChunkConfig::default()).is_empty());
        assert!(chunk_text("   \n\n  ", &ChunkConfig::default()).is_empty());
    }

    #[test]
    fn test_single_sentence_single_segment() {
        let segments = chunk_text_default("Hello world.");
        assert_eq!(segments, vec!["Hello world."]);
    }

    #[test]
    fn test_accumulate_then_close() {
        // 句子词数分别为 2、4、1，上限 5：
        // 第一句后加入第二句会到 6，先关闭；第二句加第三句恰好 5
        let config = ChunkConfig { max_words: 5 };
        let segments = chunk_text("Hello world. This is a test. Short.", &config);
        assert_eq!(segments, vec!["Hello world.", "This is a test. Short."]);
    }

    #[test]
    fn test_limit_never_violated_except_oversized_sentence() {
        let config = ChunkConfig { max_words: 3 };
        let text = "One two. A very long sentence with many words inside. End.";
        let segments = chunk_text(text, &config);

        assert_eq!(
            segments,
            vec![
                "One two.",
                "A very long sentence with many words inside.",
                "End.",
            ]
        );
        // 超长单句独占片段，其余片段不超上限
        for seg in &segments {
            let words = seg.split_whitespace().count();
            assert!(words <= 3 || !seg.contains(". "));
        }
    }

    #[test]
    fn test_sentence_sequence_preserved() {
        let config = ChunkConfig { max_words: 4 };
        let text = "First one here. Second sentence follows now! Third? Fourth ends.";
        let segments = chunk_text(text, &config);

        // 按顺序重新拼接应还原归一化后的原文
        assert_eq!(
            segments.join(" "),
            "First one here. Second sentence follows now! Third? Fourth ends."
        );
    }

    #[test]
    fn test_merges_unpunctuated_lines() {
        // 换行在归一化时折叠为空格，无句末标点的行不构成边界
        let config = ChunkConfig { max_words: 1 };
        let segments = chunk_text("line one\nline two. tail", &config);
        assert_eq!(segments, vec!["line one line two.", "tail"]);
    }

    #[test]
    fn test_terminator_without_following_whitespace_not_boundary() {
        let segments = chunk_text("Pi is 3.14 exactly. Done.", &ChunkConfig { max_words: 1 });
        assert_eq!(segments, vec!["Pi is 3.14 exactly.", "Done."]);
    }

    #[test]
    fn test_trailing_terminator_closes_last_sentence() {
        let segments = chunk_text("One. Two.", &ChunkConfig { max_words: 1 });
        assert_eq!(segments, vec!["One.", "Two."]);
    }

    #[test]
    fn test_default_config() {
        assert_eq!(ChunkConfig::default().max_words, 400);
        // 短文本在默认上限下只产生一个片段
        assert_eq!(chunk_text_default("A b c. D e f.").len(), 1);
    }

    #[test]
    fn test_pause_marks_inserted() {
        let formatted = insert_pause_marks("Hello world. Next one!");
        assert_eq!(formatted, "Hello world.\n...\nNext one!");
    }

    #[test]
    fn test_pause_marks_collapse_newlines_first() {
        let formatted = insert_pause_marks("First line.\nSecond line?");
        assert_eq!(formatted, "First line.\n...\nSecond line?");
    }

    #[test]
    fn test_pause_marks_dedupe_doubled_lines() {
        // 已含省略号的文本会产生相邻停顿行，折叠一次
        let formatted = insert_pause_marks("Go. ... Stop.");
        assert_eq!(formatted, "Go.\n...\n...\nStop.");
    }

    #[test]
    fn test_pause_marks_empty_input() {
        assert_eq!(insert_pause_marks("   "), "");
    }
}
