//! # 统一错误处理模块
//!
//! 定义 lscat 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// lscat 统一错误类型
#[derive(Error, Debug)]
pub enum LscatError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("Please enter a command")]
    EmptyCommand,

    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("Failed to start '{command}'")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed with exit code: {code}\n  {command}")]
    CommandFailed { command: String, code: i32 },

    #[error("Command terminated abnormally (no exit code)\n  {command}")]
    CommandTerminated { command: String },

    #[error("Command timed out after {secs}s and was killed\n  {command}")]
    CommandTimedOut { command: String, secs: u64 },

    // ─────────────────────────────────────────────────────────────
    // 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Settings error ({path}): {reason}")]
    SettingsError { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid orientation angles: {0}")]
    InvalidAngles(String),

    // ─────────────────────────────────────────────────────────────
    // 绘图 / CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Plot rendering failed: {0}")]
    PlotError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl LscatError {
    /// 便捷构造解析错误
    pub fn parse(format: &str, path: &std::path::Path, reason: impl Into<String>) -> Self {
        LscatError::ParseError {
            format: format.to_string(),
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, LscatError>;
