//! # status 命令实现
//!
//! 显示输出目录中保存的上一次运行记录。
//!
//! ## 依赖关系
//! - 使用 `cli/model.rs` 定义的 StatusArgs
//! - 使用 `storage/record.rs`

use crate::cli::model::StatusArgs;
use crate::error::{LscatError, Result};
use crate::models::RunOutcome;
use crate::parsers::{mueller, obj};
use crate::storage::{load_run_record, RUN_LOG};
use crate::utils::output;

use chrono::Local;
use std::path::Path;

/// 执行 status 命令
pub fn execute(args: StatusArgs) -> Result<()> {
    if !args.dir.is_dir() {
        return Err(LscatError::DirectoryNotFound {
            path: args.dir.display().to_string(),
        });
    }

    output::print_header(&format!("Last Run: {}", args.dir.display()));

    let record = load_run_record(&args.dir)?;
    for line in summary_lines(&record) {
        println!("  {}", line);
    }

    match (record.success(), record.exit_code) {
        (true, _) => output::print_success("Command completed successfully."),
        (false, Some(code)) => {
            output::print_error(&format!("Command failed with exit code: {}", code))
        }
        (false, None) if record.timed_out => output::print_error("Command timed out and was killed"),
        (false, None) => output::print_error("Command terminated abnormally"),
    }

    report_file(&args.dir.join(mueller::FILE_NAME));
    report_file(&args.dir.join(obj::DEFAULT_OBJ_FILE));

    if args.output {
        output::print_separator();
        if record.stdout.is_empty() && record.stderr.is_empty() {
            output::print_info("No output captured");
        }
        print!("{}", record.stdout);
        for line in record.stderr.lines() {
            println!("{}", output::format_stream_line(line, true));
        }
    } else {
        output::print_info(&format!(
            "Full output: {}",
            args.dir.join(RUN_LOG).display()
        ));
    }

    Ok(())
}

/// 运行记录摘要
fn summary_lines(record: &RunOutcome) -> Vec<String> {
    vec![
        format!("Command:  {}", record.command),
        format!(
            "Started:  {}",
            record
                .started_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
        ),
        format!("Duration: {:.1}s", record.duration_secs),
        format!(
            "Output:   {} stdout / {} stderr lines",
            record.stdout.lines().count(),
            record.stderr.lines().count()
        ),
    ]
}

fn report_file(path: &Path) {
    if path.is_file() {
        output::print_info(&format!("Found: {}", path.display()));
    } else {
        output::print_skip(&format!("Not found: {}", path.display()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::save_run_record;
    use chrono::Utc;

    fn outcome() -> RunOutcome {
        RunOutcome {
            command: "goad -w 0.532".into(),
            program: "goad".into(),
            args: vec!["-w".into(), "0.532".into()],
            exit_code: Some(1),
            started_at: Utc::now(),
            duration_secs: 12.34,
            timed_out: false,
            stdout: "a\nb\n".into(),
            stderr: "oops\n".into(),
            combined: Vec::new(),
        }
    }

    #[test]
    fn test_summary_lines() {
        let lines = summary_lines(&outcome());
        assert_eq!(lines[0], "Command:  goad -w 0.532");
        assert_eq!(lines[2], "Duration: 12.3s");
        assert_eq!(lines[3], "Output:   2 stdout / 1 stderr lines");
    }

    #[test]
    fn test_execute_reads_record() {
        let dir = tempfile::tempdir().unwrap();
        save_run_record(dir.path(), &outcome()).unwrap();
        execute(StatusArgs {
            dir: dir.path().to_path_buf(),
            output: true,
        })
        .unwrap();
    }

    #[test]
    fn test_execute_missing_dir() {
        let err = execute(StatusArgs {
            dir: "/nonexistent/lscat/run".into(),
            output: false,
        })
        .unwrap_err();
        assert!(matches!(err, LscatError::DirectoryNotFound { .. }));
    }
}
