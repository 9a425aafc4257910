//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `runner/`, `parsers/`, `phips/`, `storage/`, `utils/`
//! - 子模块: run, plot, config, model, status

pub mod config;
pub mod model;
pub mod plot;
pub mod run;
pub mod status;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::storage::Settings;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let settings_path = cli.settings.unwrap_or_else(Settings::default_path);
    tracing::debug!("Settings file: {}", settings_path.display());

    match cli.command {
        Commands::Run(args) => run::execute(args, &settings_path),
        Commands::Plot(args) => plot::execute(args),
        Commands::Config(args) => config::execute(args, &settings_path),
        Commands::Model(args) => model::execute(args),
        Commands::Status(args) => status::execute(args),
    }
}
