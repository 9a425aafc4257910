//! # run 子命令 CLI 定义
//!
//! 运行外部散射计算命令（默认取自设置文件），结束后自动绘图。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 复用 `cli/plot.rs` 的 PlotOptions
//! - 参数传递给 `commands/run.rs`

use super::plot::PlotOptions;
use crate::models::EulerAngles;
use crate::parsers::obj::DEFAULT_OBJ_FILE;
use crate::phips::plot::DEFAULT_PLOT_FILE;
use crate::runner::DEFAULT_WARN_AFTER;
use clap::Args;
use std::path::PathBuf;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Command to execute (defaults to the saved default command)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,

    /// Discrete orientation as alpha,beta,gamma in degrees (adds/replaces --discrete)
    #[arg(long, value_name = "A,B,G", conflicts_with = "no_discrete")]
    pub discrete: Option<EulerAngles>,

    /// Ignore the discrete orientation stored in the settings
    #[arg(long, default_value_t = false)]
    pub no_discrete: bool,

    /// Save the command (with orientation) as the new default before running
    #[arg(long, default_value_t = false)]
    pub save_default: bool,

    /// Working directory for the command
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Directory where the command writes its results
    #[arg(long, default_value = "goad_run")]
    pub output_dir: PathBuf,

    /// Geometry file written by the command
    #[arg(long, default_value = DEFAULT_OBJ_FILE)]
    pub obj: PathBuf,

    /// Warn that the command may be hanging after this many seconds (0 = never)
    #[arg(long, default_value_t = DEFAULT_WARN_AFTER.as_secs())]
    pub warn_after: u64,

    /// Kill the command after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Do not store the run log/record in the output directory
    #[arg(long, default_value_t = false)]
    pub no_record: bool,

    /// Skip automatic plotting after a successful run
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Output image for the automatic plot
    #[arg(long, default_value = DEFAULT_PLOT_FILE)]
    pub plot_output: PathBuf,

    #[command(flatten)]
    pub plot: PlotOptions,
}
