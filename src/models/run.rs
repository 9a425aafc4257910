//! # 外部命令运行结果
//!
//! 保存子进程的退出码、标准输出/错误以及计时信息，可序列化为运行记录。
//!
//! ## 依赖关系
//! - 由 `runner/process.rs` 产生
//! - 被 `storage/record.rs` 持久化
//! - 被 `commands/run.rs`, `commands/status.rs` 使用

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 子进程输出的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

impl OutputLine {
    pub fn text(&self) -> &str {
        match self {
            OutputLine::Stdout(s) | OutputLine::Stderr(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, OutputLine::Stderr(_))
    }
}

/// 一次命令执行的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// 实际执行的完整命令
    pub command: String,
    pub program: String,
    pub args: Vec<String>,
    /// 退出码；被信号终止或超时被杀时为 None
    pub exit_code: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub timed_out: bool,
    pub stdout: String,
    pub stderr: String,
    /// 按到达顺序交错的输出
    #[serde(skip)]
    pub combined: Vec<OutputLine>,
}

impl RunOutcome {
    /// 退出码为 0 且未超时
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }

    /// 交错输出的纯文本形式
    pub fn combined_text(&self) -> String {
        let mut text = String::new();
        for line in &self.combined {
            text.push_str(line.text());
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(exit_code: Option<i32>, timed_out: bool) -> RunOutcome {
        RunOutcome {
            command: "goad --help".into(),
            program: "goad".into(),
            args: vec!["--help".into()],
            exit_code,
            started_at: Utc::now(),
            duration_secs: 0.1,
            timed_out,
            stdout: String::new(),
            stderr: String::new(),
            combined: vec![
                OutputLine::Stdout("a".into()),
                OutputLine::Stderr("b".into()),
            ],
        }
    }

    #[test]
    fn test_success_rules() {
        assert!(outcome(Some(0), false).success());
        assert!(!outcome(Some(2), false).success());
        assert!(!outcome(None, true).success());
    }

    #[test]
    fn test_combined_text() {
        assert_eq!(outcome(Some(0), false).combined_text(), "a\nb\n");
    }
}
