//! # 运行记录
//!
//! 每次运行后在输出目录写入 `lscat_run.log`（交错输出）和
//! `lscat_run.json`（结构化结果）。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs`, `commands/status.rs` 使用
//! - 使用 `models/run.rs`, `storage/text.rs`

use crate::error::{LscatError, Result};
use crate::models::RunOutcome;
use crate::storage::text::{load_data, save_data};
use std::path::{Path, PathBuf};

/// 文本日志文件名
pub const RUN_LOG: &str = "lscat_run.log";
/// JSON 记录文件名
pub const RUN_JSON: &str = "lscat_run.json";

/// 保存运行记录，返回 (日志路径, JSON 路径)
pub fn save_run_record(dir: &Path, outcome: &RunOutcome) -> Result<(PathBuf, PathBuf)> {
    let log_path = dir.join(RUN_LOG);
    let json_path = dir.join(RUN_JSON);

    let mut log = format!(
        "> {}\n# started: {}\n# duration: {:.2}s\n",
        outcome.command,
        outcome.started_at.to_rfc3339(),
        outcome.duration_secs
    );
    match outcome.exit_code {
        Some(code) => log.push_str(&format!("# exit code: {}\n", code)),
        None if outcome.timed_out => log.push_str("# timed out\n"),
        None => log.push_str("# terminated by signal\n"),
    }
    log.push('\n');
    log.push_str(&outcome.combined_text());
    save_data(&log, &log_path)?;

    let json = serde_json::to_string_pretty(outcome).map_err(|e| LscatError::Other(format!(
        "Failed to serialize run record: {}",
        e
    )))?;
    save_data(&json, &json_path)?;

    Ok((log_path, json_path))
}

/// 读取输出目录中的运行记录
pub fn load_run_record(dir: &Path) -> Result<RunOutcome> {
    let path = dir.join(RUN_JSON);
    let content = load_data(&path)?;
    serde_json::from_str(&content).map_err(|e| LscatError::parse("run record", &path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputLine;
    use chrono::Utc;

    #[test]
    fn test_record_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = RunOutcome {
            command: "goad --discrete 0.0,0.0,0.0".into(),
            program: "goad".into(),
            args: vec!["--discrete".into(), "0.0,0.0,0.0".into()],
            exit_code: Some(0),
            started_at: Utc::now(),
            duration_secs: 1.25,
            timed_out: false,
            stdout: "done\n".into(),
            stderr: "warn\n".into(),
            combined: vec![
                OutputLine::Stdout("done".into()),
                OutputLine::Stderr("warn".into()),
            ],
        };

        let (log_path, _) = save_run_record(dir.path(), &outcome).unwrap();
        let log = std::fs::read_to_string(log_path).unwrap();
        assert!(log.starts_with("> goad --discrete 0.0,0.0,0.0\n"));
        assert!(log.contains("# exit code: 0"));
        assert!(log.ends_with("done\nwarn\n"));

        let loaded = load_run_record(dir.path()).unwrap();
        assert_eq!(loaded.command, outcome.command);
        assert_eq!(loaded.exit_code, Some(0));
        assert_eq!(loaded.stderr, "warn\n");
        assert!(loaded.combined.is_empty());
    }

    #[test]
    fn test_missing_record() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_run_record(dir.path()),
            Err(LscatError::FileNotFound { .. })
        ));
    }
}
