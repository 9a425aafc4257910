//! # 命令行组装
//!
//! 将用户输入的命令文本拆分为程序与参数，并注入 `--discrete α,β,γ` 取向参数。
//!
//! ## 依赖关系
//! - 被 `runner/process.rs`, `commands/run.rs` 使用
//! - 使用 `regex` 定位已有的 `--discrete` 参数

use crate::error::{LscatError, Result};
use crate::models::EulerAngles;

use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

/// 离散取向参数名
pub const DISCRETE_FLAG: &str = "--discrete";

fn discrete_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 1: 前导空白  2: "=值" / "空白 值" / 行尾
    RE.get_or_init(|| Regex::new(r"(^|\s)--discrete(=\S*|\s+\S+|\s*$)").unwrap())
}

/// 在命令中设置离散取向角
///
/// 命令中没有 `--discrete` 时追加；已有时替换第一个出现的值。
pub fn apply_discrete(command: &str, angles: &EulerAngles) -> String {
    let value = angles.to_string();
    let re = discrete_regex();

    if !re.is_match(command) {
        return format!("{} {} {}", command.trim_end(), DISCRETE_FLAG, value);
    }

    re.replacen(command, 1, |caps: &regex::Captures| {
        if caps[2].starts_with('=') {
            format!("{}{}={}", &caps[1], DISCRETE_FLAG, value)
        } else {
            format!("{}{} {}", &caps[1], DISCRETE_FLAG, value)
        }
    })
    .into_owned()
}

/// 已拆分的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        CommandLine {
            program: program.into(),
            args,
        }
    }

    /// 解析命令文本
    ///
    /// 按空白拆分，支持单/双引号包裹含空格的参数；程序名开头的 `~/` 展开为主目录。
    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = split_words(text)?.into_iter();
        let program = tokens.next().ok_or(LscatError::EmptyCommand)?;
        Ok(CommandLine {
            program: expand_home(&program),
            args: tokens.collect(),
        })
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote_word(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote_word(arg))?;
        }
        Ok(())
    }
}

/// 按 `split_words` 的规则加引号，保证文本可原样拆回
///
/// 没有转义字符：单引号放进双引号段，其余字符放进单引号段，相邻段拼成一个词。
fn quote_word(word: &str) -> Cow<'_, str> {
    let plain = !word.is_empty()
        && !word
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '\'');
    if plain {
        return Cow::Borrowed(word);
    }
    if word.is_empty() {
        return Cow::Borrowed("''");
    }

    let mut quoted = String::with_capacity(word.len() + 2);
    let mut open: Option<char> = None;
    for ch in word.chars() {
        let q = if ch == '\'' { '"' } else { '\'' };
        if open != Some(q) {
            if let Some(prev) = open {
                quoted.push(prev);
            }
            quoted.push(q);
            open = Some(q);
        }
        quoted.push(ch);
    }
    if let Some(q) = open {
        quoted.push(q);
    }
    Cow::Owned(quoted)
}

/// 拆分命令文本
fn split_words(text: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in text.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(LscatError::InvalidArgument(format!(
            "unterminated {} quote in command: {}",
            q, text
        )));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}

fn expand_home(program: &str) -> String {
    if let Some(rest) = program.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest).display().to_string();
        }
    }
    program.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angles() -> EulerAngles {
        EulerAngles::new(10.0, 20.0, 30.0).unwrap()
    }

    #[test]
    fn test_discrete_appended() {
        assert_eq!(
            apply_discrete("goad -w 0.532", &angles()),
            "goad -w 0.532 --discrete 10.0,20.0,30.0"
        );
    }

    #[test]
    fn test_discrete_value_replaced() {
        assert_eq!(
            apply_discrete("goad --discrete 1,2,3 -w 0.532", &angles()),
            "goad --discrete 10.0,20.0,30.0 -w 0.532"
        );
    }

    #[test]
    fn test_discrete_equals_form_replaced() {
        assert_eq!(
            apply_discrete("goad --discrete=1,2,3", &angles()),
            "goad --discrete=10.0,20.0,30.0"
        );
    }

    #[test]
    fn test_trailing_discrete_gets_value() {
        assert_eq!(
            apply_discrete("goad --discrete", &angles()),
            "goad --discrete 10.0,20.0,30.0"
        );
    }

    #[test]
    fn test_similar_flag_not_confused() {
        assert_eq!(
            apply_discrete("goad --discrete-mode x", &angles()),
            "goad --discrete-mode x --discrete 10.0,20.0,30.0"
        );
    }

    #[test]
    fn test_parse_command() {
        let cmd = CommandLine::parse("  goad   -w 0.532  --dir goad_run ").unwrap();
        assert_eq!(cmd.program, "goad");
        assert_eq!(cmd.args, vec!["-w", "0.532", "--dir", "goad_run"]);
    }

    #[test]
    fn test_parse_quoted_args() {
        let cmd = CommandLine::parse(r#"sh -c 'echo hi; exit 3' "a b""#).unwrap();
        assert_eq!(cmd.args, vec!["-c", "echo hi; exit 3", "a b"]);
        assert_eq!(cmd.to_string(), r#"sh -c 'echo hi; exit 3' 'a b'"#);
    }

    #[test]
    fn test_display_parses_back_to_same_args() {
        let cases: Vec<Vec<&str>> = vec![
            vec!["-c", r#"echo "hi there""#],
            vec![r#"a"b"#],
            vec!["it's", r#"say "it's""#, ""],
            vec!["--discrete", "1,2,3", "plain"],
        ];
        for args in cases {
            let cmd = CommandLine::new("prog", args.iter().map(|a| a.to_string()).collect());
            let text = cmd.to_string();
            assert_eq!(CommandLine::parse(&text).unwrap(), cmd, "text: {}", text);
        }
    }

    #[test]
    fn test_parse_empty_command() {
        assert!(matches!(CommandLine::parse("   "), Err(LscatError::EmptyCommand)));
        assert!(CommandLine::parse("goad 'oops").is_err());
    }

    #[test]
    fn test_home_expansion() {
        if let Some(home) = dirs::home_dir() {
            let cmd = CommandLine::parse("~/bin/goad --help").unwrap();
            assert_eq!(cmd.program, home.join("bin/goad").display().to_string());
        }
    }
}
