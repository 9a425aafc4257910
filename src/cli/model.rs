//! # model / status 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/model.rs`, `commands/status.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 图像格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
}

/// model 子命令参数
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// OBJ geometry file
    #[arg(default_value = "rotated.obj")]
    pub input: PathBuf,

    /// Render a wireframe projection to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Image format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<ImageFormat>,

    /// View rotation alpha (degrees)
    #[arg(long, default_value_t = 0.0)]
    pub alpha: f64,

    /// View rotation beta (degrees)
    #[arg(long, default_value_t = 0.0)]
    pub beta: f64,

    /// View rotation gamma (degrees)
    #[arg(long, default_value_t = 0.0)]
    pub gamma: f64,

    /// Figure width
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Figure height
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}

/// status 子命令参数
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output directory of a previous run
    #[arg(default_value = "goad_run")]
    pub dir: PathBuf,

    /// Also print the captured output
    #[arg(long, default_value_t = false)]
    pub output: bool,
}
