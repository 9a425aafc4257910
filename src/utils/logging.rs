//! # 诊断日志
//!
//! 初始化 `tracing` 订阅器：终端输出到 stderr，可选同时写入日志文件。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `tracing-subscriber`

use crate::error::{LscatError, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// 由 -v 次数和 --quiet 决定日志级别
pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// 初始化全局日志；`RUST_LOG` 可覆盖级别
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity, quiet).into())
        .from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let registry = tracing_subscriber::registry().with(filter).with(stderr_layer);

    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| LscatError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
            let file_layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true);
            registry
                .with(file_layer)
                .try_init()
                .map_err(|e| LscatError::Other(format!("Failed to initialise logging: {}", e)))?;
        }
        None => registry
            .try_init()
            .map_err(|e| LscatError::Other(format!("Failed to initialise logging: {}", e)))?,
    }

    Ok(())
}
