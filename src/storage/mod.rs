//! # 数据存储模块
//!
//! 结果与测量数据在磁盘上的读写。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `commands/` 使用
//! - 子模块: text, table, settings, record

pub mod record;
pub mod settings;
pub mod table;
pub mod text;

pub use record::{load_run_record, save_run_record, RUN_LOG};
pub use settings::Settings;
pub use text::load_data;
