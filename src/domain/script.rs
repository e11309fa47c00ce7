//! 解说脚本领域逻辑
//!
//! 步骤计数启发式、词数预算与提示词组装。提示词是发送给外部
//! 文本生成服务的唯一载荷，这里只做纯字符串构造，不涉及网络。

/// 单任务脚本请求
#[derive(Debug, Clone)]
pub struct ScriptRequest {
    pub title: String,
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub target_word_count: usize,
    pub instructions: String,
}

/// Masterclass 用例
#[derive(Debug, Clone)]
pub struct UseCase {
    pub task_name: String,
    pub instructions: String,
}

/// 多用例 Masterclass 脚本请求
#[derive(Debug, Clone)]
pub struct MasterclassRequest {
    pub title: String,
    pub software_name: String,
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub target_word_count: usize,
    pub use_cases: Vec<UseCase>,
}

/// 估算指令中的步骤数
///
/// 三种信号取最大值，至少为 1：
/// 1. `<li>` 标签数
/// 2. 编号步骤数（`1.`、`2)`、`Step 3` 等形式）
/// 3. 去除 HTML 后的非空行数（仅当多于一行时采用）
pub fn count_steps(instructions: &str) -> usize {
    let li_count = count_li_tags(instructions);
    let numbered_count = count_numbered_steps(instructions);

    let lines = strip_html_tags(instructions)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count();
    let line_count = if lines > 1 { lines } else { 1 };

    li_count.max(numbered_count).max(line_count).max(1)
}

/// 每步分配的词数（向下取整）
pub fn words_per_step(target_word_count: usize, steps: usize) -> usize {
    target_word_count / steps.max(1)
}

/// 统计 `<li ...>` 标签出现次数（大小写不敏感）
fn count_li_tags(html: &str) -> usize {
    let lower = html.to_lowercase();
    let mut rest = lower.as_str();
    let mut count = 0;

    while let Some(pos) = rest.find("<li") {
        let after = &rest[pos + 3..];
        match after.find('>') {
            Some(close) => {
                count += 1;
                rest = &after[close + 1..];
            }
            None => break,
        }
    }

    count
}

/// 统计编号步骤出现次数
///
/// 匹配"数字串 + `.` 或 `)` + 空白"以及"step + 空白 + 数字"两种形式
fn count_numbered_steps(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut count = 0;
    let mut i = 0;

    while i < chars.len() {
        if let Some(consumed) = match_step_keyword(&chars, i) {
            count += 1;
            i += consumed;
            continue;
        }

        if chars[i].is_ascii_digit() {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            if j < chars.len()
                && matches!(chars[j], '.' | ')')
                && j + 1 < chars.len()
                && chars[j + 1].is_whitespace()
            {
                count += 1;
                i = j + 2;
            } else {
                i = j;
            }
            continue;
        }

        i += 1;
    }

    count
}

/// 匹配 `step` 关键字形式（如 "Step 3"），返回消费的字符数
fn match_step_keyword(chars: &[char], start: usize) -> Option<usize> {
    const KEYWORD: [char; 4] = ['s', 't', 'e', 'p'];

    if start + KEYWORD.len() > chars.len() {
        return None;
    }
    for (offset, expected) in KEYWORD.iter().enumerate() {
        if chars[start + offset].to_ascii_lowercase() != *expected {
            return None;
        }
    }

    let mut j = start + KEYWORD.len();
    let whitespace_start = j;
    while j < chars.len() && chars[j].is_whitespace() {
        j += 1;
    }
    if j == whitespace_start {
        return None;
    }

    let digit_start = j;
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    if j == digit_start {
        return None;
    }

    Some(j - start)
}

/// 去除 HTML 标签
fn strip_html_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;

    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }

    out
}

/// 以自然语言连接任务名列表
///
/// 1 个 → "a"；2 个 → "a and b"；3 个及以上 → "a, b, and c"
pub fn join_task_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

/// 组装单任务脚本提示词
pub fn build_script_prompt(request: &ScriptRequest) -> String {
    let steps = count_steps(&request.instructions);
    let per_step = words_per_step(request.target_word_count, steps);
    let word_count_range = format!("{}-{}", request.min_word_count, request.max_word_count);

    format!(
        "Take the following step-by-step instructions and transform them into a detailed, \
         natural-sounding script when read aloud. Your script must be approximately {range} words \
         long (target: {target} words). There are {steps} steps in the instructions, so you should \
         allocate approximately {per_step} words per step. The script should be easy to follow, \
         instructional, and conversational, with a focus on clarity and thoroughness. Make sure to \
         provide explanations, context, and additional tips where necessary to enhance \
         understanding, but do not add any new steps. The script should be well-structured and \
         flow naturally for an AI voiceover. Do not add step numbers or anything other than the \
         script which should be read. You must remove sensitive info such as names, emails, \
         passwords, API keys, phone numbers, etc., from your script. It should start with 'In \
         today's video, I'm going to teach you {title}.' Please do not add weird rhetorical \
         questions or random stuff that deviates from the intention of the script/video. The \
         voice-over length when read aloud is written after the title; please ensure it meets it \
         or is slightly longer, and take into account that this will be read at about 190 words \
         per minute. You must NOT include bullet points or Bold text in your answer, as those \
         aren't generally found on scripts. IMPORTANT: Strictly adhere to the word count target of \
         {target} words. Do not exceed this limit significantly.\n\nThe video title, length, and \
         step-by-step instructions are below: video title: {title} length: {target} words \
         (approximately {per_step} words per step) step-by-step-instructions: {instructions}",
        range = word_count_range,
        target = request.target_word_count,
        steps = steps,
        per_step = per_step,
        title = request.title,
        instructions = request.instructions,
    )
}

/// 组装 Masterclass 脚本提示词
pub fn build_masterclass_prompt(request: &MasterclassRequest) -> String {
    let use_case_count = request.use_cases.len();
    let per_use_case = words_per_step(request.target_word_count, use_case_count);

    let names: Vec<String> = request
        .use_cases
        .iter()
        .map(|u| u.task_name.trim().to_string())
        .collect();
    let task_names_list = join_task_names(&names);

    let data_block = request
        .use_cases
        .iter()
        .map(|u| {
            format!(
                "Task: {}\nInstructions:\n{}",
                u.task_name.trim(),
                u.instructions.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    format!(
        "Take the following multi-use-case instructions and transform them into a detailed, \
         natural-sounding masterclass script when read aloud. Your script must be approximately \
         {min}-{max} words long (target: {target} words). There are {count} distinct use cases to \
         cover. To ensure the script stays within the target length, you should allocate \
         approximately {per_use_case} words per use case. Each use case contains a set of \
         step-by-step instructions; please synthesize these steps into a fluid, conversational \
         explanation that fits within the allocated word count for that specific use case. The \
         script should be easy to follow, instructional, and conversational, with a focus on \
         clarity and thoroughness. Make sure to provide explanations, context, and additional \
         tips where necessary to enhance understanding, but do not add any new steps or use \
         cases. The script should be well-structured and flow naturally for an AI voiceover. Do \
         not add step numbers or anything other than the script which should be read. You must \
         remove sensitive info such as names, emails, passwords, API keys, phone numbers, etc., \
         from your script.\n\nStart the script EXACTLY with this phrasing, filling in the \
         dynamically generated list of use cases: 'In today's video, I'm going to show you the \
         best use cases for {software}. We're going to go over how to {task_names}.' Do NOT \
         output a title line or a word count / voice-over length line at the top—output only the \
         script to be read aloud, starting with that opening line. Ensure the script meets or \
         slightly exceeds the target word count when read aloud (about 190 words per minute). \
         Please do not add weird rhetorical questions or random stuff that deviates from the \
         intention of the script/video. You must NOT include bullet points or Bold text in your \
         answer, as those aren't generally found on scripts. The structure of the script should \
         follow this repeating order for every use case provided:\n'The [first/next/final] use \
         case I'm going to teach you is how to [Task Name]' [Task Instructions]\n\nHere is the \
         data for this video: Software Name: {software} Video Title: {title} Target Length: \
         {target} words\n\n{data_block}",
        min = request.min_word_count,
        max = request.max_word_count,
        target = request.target_word_count,
        count = use_case_count,
        per_use_case = per_use_case,
        software = request.software_name.trim(),
        task_names = task_names_list,
        title = request.title.trim(),
        data_block = data_block,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_steps_from_li_tags() {
        let html = "<ol><li>Open the app</li><li>Click save</li><li>Done</li></ol>";
        assert_eq!(count_steps(html), 3);
    }

    #[test]
    fn test_count_steps_from_numbered_list() {
        let text = "1. Open the door\n2. Walk in\n3) Sit down";
        // 编号数与行数一致
        assert_eq!(count_steps(text), 3);
    }

    #[test]
    fn test_count_steps_from_step_keyword() {
        let text = "Step 1: prepare. Step 2: execute.";
        assert_eq!(count_numbered_steps(text), 2);
    }

    #[test]
    fn test_count_steps_from_plain_lines() {
        let text = "open the editor\nwrite some text\nsave the file\n\n";
        assert_eq!(count_steps(text), 3);
    }

    #[test]
    fn test_count_steps_single_line_is_one() {
        assert_eq!(count_steps("just do the thing"), 1);
        assert_eq!(count_steps(""), 1);
    }

    #[test]
    fn test_count_steps_takes_maximum_signal() {
        // 两行文本但含四个 <li>
        let html = "<li>a</li><li>b</li>\n<li>c</li><li>d</li>";
        assert_eq!(count_steps(html), 4);
    }

    #[test]
    fn test_numbered_steps_require_following_whitespace() {
        // "3.14" 不是编号步骤
        assert_eq!(count_numbered_steps("pi is 3.14 ok"), 0);
        assert_eq!(count_numbered_steps("1. first 2. second"), 2);
    }

    #[test]
    fn test_words_per_step() {
        assert_eq!(words_per_step(1600, 4), 400);
        assert_eq!(words_per_step(100, 3), 33);
        // 除零保护
        assert_eq!(words_per_step(100, 0), 100);
    }

    #[test]
    fn test_join_task_names() {
        let one = vec!["export data".to_string()];
        let two = vec!["export data".to_string(), "import data".to_string()];
        let three = vec![
            "export".to_string(),
            "import".to_string(),
            "sync".to_string(),
        ];

        assert_eq!(join_task_names(&[]), "");
        assert_eq!(join_task_names(&one), "export data");
        assert_eq!(join_task_names(&two), "export data and import data");
        assert_eq!(join_task_names(&three), "export, import, and sync");
    }

    #[test]
    fn test_script_prompt_embeds_word_targets() {
        let request = ScriptRequest {
            title: "how to bake bread".to_string(),
            min_word_count: 1500,
            max_word_count: 1700,
            target_word_count: 1600,
            instructions: "1. Mix flour\n2. Knead dough\n3. Bake it\n4. Cool down".to_string(),
        };
        let prompt = build_script_prompt(&request);

        assert!(prompt.contains("approximately 1500-1700 words"));
        assert!(prompt.contains("target: 1600 words"));
        assert!(prompt.contains("There are 4 steps"));
        assert!(prompt.contains("approximately 400 words per step"));
        assert!(prompt.contains("teach you how to bake bread."));
    }

    #[test]
    fn test_masterclass_prompt_embeds_use_cases() {
        let request = MasterclassRequest {
            title: "CRM Masterclass".to_string(),
            software_name: "AcmeCRM".to_string(),
            min_word_count: 2000,
            max_word_count: 2400,
            target_word_count: 2200,
            use_cases: vec![
                UseCase {
                    task_name: "create a contact".to_string(),
                    instructions: "1. Open contacts\n2. Click new".to_string(),
                },
                UseCase {
                    task_name: "send a campaign".to_string(),
                    instructions: "1. Open campaigns\n2. Click send".to_string(),
                },
            ],
        };
        let prompt = build_masterclass_prompt(&request);

        assert!(prompt.contains("There are 2 distinct use cases"));
        assert!(prompt.contains("approximately 1100 words per use case"));
        assert!(prompt.contains("best use cases for AcmeCRM"));
        assert!(prompt.contains("how to create a contact and send a campaign."));
        assert!(prompt.contains("Task: create a contact\nInstructions:"));
        assert!(prompt.contains("\n\n---\n\n"));
    }
}
