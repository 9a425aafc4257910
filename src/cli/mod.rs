//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `run`: 运行 GOAD 等外部散射计算并自动绘图
//! - `plot`: 分箱并与 PHIPS 测量数据对比绘图
//! - `config`: 管理默认命令和取向角
//! - `model`: 查看 / 渲染粒子几何
//! - `status`: 查看上一次运行记录
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: run, plot, config, model

pub mod config;
pub mod model;
pub mod plot;
pub mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lscat - 光散射计算运行与 PHIPS 对比工具
#[derive(Parser, Debug)]
#[command(name = "lscat")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Run light-scattering computations and compare them with PHIPS measurements", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress diagnostic logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also write diagnostic logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: <config dir>/lscat/settings.json)
    #[arg(long, global = true, env = "LSCAT_SETTINGS", value_name = "PATH")]
    pub settings: Option<PathBuf>,
}

/// 可用的子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a scattering computation command and plot its results
    Run(run::RunArgs),

    /// Bin mueller_scatgrid output to PHIPS detectors and plot against measurements
    Plot(plot::PlotArgs),

    /// Manage the default command and discrete orientation
    Config(config::ConfigArgs),

    /// Inspect or render an OBJ particle geometry
    Model(model::ModelArgs),

    /// Show the stored record of a previous run
    Status(model::StatusArgs),
}
