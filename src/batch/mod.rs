//! # 批量处理模块
//!
//! 一次对多个 GOAD 运行目录生成对比图。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchRunner, ProcessResult};
