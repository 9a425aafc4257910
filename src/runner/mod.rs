//! # 子进程运行模块
//!
//! 组装外部散射计算命令（如 GOAD）并执行，捕获其输出。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 使用 `models/run.rs`, `models/orientation.rs`
//! - 子模块: command, process

pub mod command;
pub mod process;

pub use command::{apply_discrete, CommandLine};
pub use process::{ensure_success, RunEvent, SubprocessRunner, DEFAULT_WARN_AFTER};
