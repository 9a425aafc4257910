//! # config 子命令 CLI 定义
//!
//! 管理设置文件中的默认命令与离散取向角。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/config.rs`

use clap::{Args, Subcommand};

/// config 主命令参数
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// config 子命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current settings
    Show,

    /// Print the settings file location
    Path,

    /// Save a command as the default command
    SetDefault {
        /// Command text
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        command: Vec<String>,
    },

    /// Restore the factory default command
    FactoryReset,

    /// Configure the discrete orientation appended to commands
    Angles(AnglesArgs),
}

/// 取向角设置参数
#[derive(Args, Debug)]
pub struct AnglesArgs {
    /// Enable the discrete orientation
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,

    /// Disable the discrete orientation
    #[arg(long)]
    pub disable: bool,

    /// Alpha in degrees (0-360)
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Beta in degrees (0-360)
    #[arg(long)]
    pub beta: Option<f64>,

    /// Gamma in degrees (0-360)
    #[arg(long)]
    pub gamma: Option<f64>,
}
