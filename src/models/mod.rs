//! # 数据模型模块
//!
//! 定义散射数据、运行结果、取向角和网格模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `runner/`, `phips/` 和 `commands/` 使用
//! - 子模块: dataset, run, orientation, mesh

pub mod dataset;
pub mod mesh;
pub mod orientation;
pub mod run;

pub use dataset::{Bin, BinnedPattern, ScatGrid, ScatPoint, Series, Table};
pub use mesh::Mesh;
pub use orientation::EulerAngles;
pub use run::{OutputLine, RunOutcome};
