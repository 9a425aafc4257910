//! # plot 子命令 CLI 定义
//!
//! 将 `mueller_scatgrid` 分箱后与 PHIPS 测量数据对比绘图。
//! `PlotOptions` 同时被 `run` 子命令复用（运行结束后自动绘图）。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs`, `cli/run.rs` 使用
//! - 参数传递给 `commands/plot.rs`

use crate::phips::binning::{
    DEFAULT_BIN_WIDTH, DEFAULT_DETECTORS, DEFAULT_END, DEFAULT_START, DEFAULT_WAVELENGTH,
};
use crate::parsers::reference::DEFAULT_LABEL;
use crate::phips::plot::DEFAULT_PLOT_FILE;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV table of binned values
    Csv,
    /// XY data file (theta, mean DSCS)
    Xy,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Csv => "csv",
            OutputFormat::Xy => "xy",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// 绘图参数（plot 与 run 共用）
#[derive(Args, Debug, Clone)]
pub struct PlotOptions {
    /// TOML file with custom detector centres (`bins = [...]`); phips_bins.toml is used when present
    #[arg(long, value_name = "PATH")]
    pub bins: Option<PathBuf>,

    /// Measured PHIPS data to overlay; Plate_Crystal_IMPACTS2022_RF02_3606.txt is used when present
    #[arg(long, value_name = "PATH")]
    pub reference: Option<PathBuf>,

    /// Do not overlay measured data
    #[arg(long, default_value_t = false, conflicts_with = "reference")]
    pub no_reference: bool,

    /// Legend label for the measured data
    #[arg(long, default_value = DEFAULT_LABEL)]
    pub reference_label: String,

    /// Wavelength in microns (used for the S11 -> DSCS conversion)
    #[arg(long, default_value_t = DEFAULT_WAVELENGTH)]
    pub wavelength: f64,

    /// Number of PHIPS detectors
    #[arg(long, default_value_t = DEFAULT_DETECTORS)]
    pub detectors: usize,

    /// Angle of the first detector (degrees)
    #[arg(long, default_value_t = DEFAULT_START)]
    pub start: f64,

    /// Angle of the last detector (degrees)
    #[arg(long, default_value_t = DEFAULT_END)]
    pub end: f64,

    /// Angular width of each detector bin (degrees)
    #[arg(long, default_value_t = DEFAULT_BIN_WIDTH)]
    pub bin_width: f64,

    /// Figure width in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Figure height in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Plot title
    #[arg(long)]
    pub title: Option<String>,
}

/// plot 子命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// mueller_scatgrid file, or a directory of GOAD runs (batch mode)
    #[arg(default_value = "goad_run/mueller_scatgrid")]
    pub input: PathBuf,

    /// Output: file path (single mode) or directory (batch mode)
    #[arg(short, long, default_value = DEFAULT_PLOT_FILE)]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub options: PlotOptions,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for result files (batch mode, comma separated)
    #[arg(long, default_value = "mueller_scatgrid")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files (batch mode)
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
