//! # PHIPS 对比模块
//!
//! 将 GOAD 计算结果按 PHIPS 探测器分箱，并与测量数据对比绘图。
//!
//! ## 子模块
//! - `binning`: DSCS 换算与探测器分箱
//! - `plot`: 对比图（图表管理器）
//! - `model_plot`: 粒子几何线框图
//! - `export`: 分箱数据导出
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs`, `commands/run.rs`, `commands/model.rs` 使用
//! - 使用 `models/`

pub mod binning;
pub mod export;
pub mod model_plot;
pub mod plot;

pub use binning::PhipsConfig;
pub use plot::PlotManager;
