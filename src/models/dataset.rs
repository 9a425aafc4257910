//! # 散射数据模型
//!
//! 定义数值表格、GOAD Mueller 散射网格、测量曲线以及 PHIPS 分箱结果。
//!
//! ## 依赖关系
//! - 被 `storage/table.rs`, `parsers/` 构造
//! - 被 `phips/` 和 `commands/` 使用

use serde::{Deserialize, Serialize};

/// 通用数值表格（所有行列数一致）
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// 列数
    pub columns: usize,
    /// 行数据
    pub rows: Vec<Vec<f64>>,
}

/// Mueller 散射网格中的单个点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatPoint {
    /// 散射角 θ (°)
    pub theta: f64,
    /// 方位角 φ (°)
    pub phi: f64,
    /// Mueller 矩阵元 S11
    pub s11: f64,
}

/// GOAD 输出的 `mueller_scatgrid`
#[derive(Debug, Clone)]
pub struct ScatGrid {
    /// 名称（通常取自运行目录）
    pub name: String,
    pub points: Vec<ScatPoint>,
}

impl ScatGrid {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// θ 覆盖范围
    pub fn theta_range(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let min = self.points.iter().map(|p| p.theta).fold(f64::INFINITY, f64::min);
        let max = self
            .points
            .iter()
            .map(|p| p.theta)
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

/// 一条 (角度, 强度) 曲线
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// 图例标签
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Series {
            label: label.into(),
            points,
        }
    }

    /// 可在对数坐标上绘制的点（有限且为正）
    pub fn positive_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite() && *y > 0.0)
    }
}

/// PHIPS 探测器分箱
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// 探测器序号
    pub index: usize,
    /// 中心角 (°)
    pub center: f64,
    /// 落入该分箱的数据点数
    pub count: usize,
    /// 平均微分散射截面，空分箱为 None
    pub mean: Option<f64>,
}

impl Bin {
    /// 分箱日志行
    pub fn log_line(&self) -> String {
        match self.mean {
            Some(v) => format!(
                "Bin {}: theta={:.1}°, {} points, mean S11={:.6e}",
                self.index, self.center, self.count, v
            ),
            None => format!(
                "Bin {}: theta={:.1}°, no data points found",
                self.index, self.center
            ),
        }
    }
}

/// 分箱后的散射图样
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinnedPattern {
    /// 数据来源名称
    pub name: String,
    /// 波长 (µm)
    pub wavelength: f64,
    /// 分箱宽度 (°)
    pub bin_width: f64,
    pub bins: Vec<Bin>,
}

impl BinnedPattern {
    /// 转换为曲线（跳过空分箱）
    pub fn to_series(&self, label: &str) -> Series {
        let points = self
            .bins
            .iter()
            .filter_map(|b| b.mean.map(|m| (b.center, m)))
            .collect();
        Series::new(label, points)
    }

    /// 非空分箱数量
    pub fn filled(&self) -> usize {
        self.bins.iter().filter(|b| b.mean.is_some()).count()
    }

    pub fn log_lines(&self) -> Vec<String> {
        self.bins.iter().map(Bin::log_line).collect()
    }
}
