//! # PHIPS 探测器分箱
//!
//! 将 GOAD 的 S11 转换为微分散射截面 (DSCS)，并按 PHIPS 探测器角度分箱平均。
//!
//! ## 计算
//! - 波数 k = 2π / λ
//! - DSCS = S11 × 1e-12 / k²
//! - 第 i 个探测器收集 θᵢ − w/2 ≤ θ < θᵢ + w/2 的点，取平均
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `models/dataset.rs` 的 ScatGrid, BinnedPattern

use crate::error::{LscatError, Result};
use crate::models::{Bin, BinnedPattern, ScatGrid};
use std::f64::consts::PI;

/// 默认波长 (µm)
pub const DEFAULT_WAVELENGTH: f64 = 0.532;
/// PHIPS 探测器数量
pub const DEFAULT_DETECTORS: usize = 20;
/// 第一个探测器角度 (°)
pub const DEFAULT_START: f64 = 18.0;
/// 最后一个探测器角度 (°)
pub const DEFAULT_END: f64 = 170.0;
/// 探测器角宽度 (°)
pub const DEFAULT_BIN_WIDTH: f64 = 8.0;

/// S11 → DSCS 的单位换算系数
const DSCS_UNIT: f64 = 1e-12;

/// 分箱参数
#[derive(Debug, Clone, PartialEq)]
pub struct PhipsConfig {
    /// 波长 (µm)
    pub wavelength: f64,
    pub detectors: usize,
    pub start: f64,
    pub end: f64,
    pub bin_width: f64,
    /// 自定义分箱中心（来自 bins TOML）
    pub centers: Option<Vec<f64>>,
}

impl Default for PhipsConfig {
    fn default() -> Self {
        PhipsConfig {
            wavelength: DEFAULT_WAVELENGTH,
            detectors: DEFAULT_DETECTORS,
            start: DEFAULT_START,
            end: DEFAULT_END,
            bin_width: DEFAULT_BIN_WIDTH,
            centers: None,
        }
    }
}

impl PhipsConfig {
    /// 校验参数
    pub fn validate(&self) -> Result<()> {
        if !(self.wavelength.is_finite() && self.wavelength > 0.0) {
            return Err(LscatError::InvalidArgument(format!(
                "wavelength must be positive, got {}",
                self.wavelength
            )));
        }
        if !(self.bin_width.is_finite() && self.bin_width > 0.0) {
            return Err(LscatError::InvalidArgument(format!(
                "bin width must be positive, got {}",
                self.bin_width
            )));
        }
        if self.centers.is_none() {
            if self.detectors == 0 {
                return Err(LscatError::InvalidArgument(
                    "number of detectors must be at least 1".to_string(),
                ));
            }
            if self.start < 0.0 || self.end > 180.0 || self.start > self.end {
                return Err(LscatError::InvalidArgument(format!(
                    "detector range {}-{} (must be 0 <= start <= end <= 180)",
                    self.start, self.end
                )));
            }
        }
        Ok(())
    }

    /// 波数 k = 2π/λ (µm⁻¹)
    pub fn wavenumber(&self) -> f64 {
        2.0 * PI / self.wavelength
    }

    /// S11 → DSCS 换算系数
    pub fn dscs_factor(&self) -> f64 {
        DSCS_UNIT / self.wavenumber().powi(2)
    }

    /// 分箱中心
    pub fn centers(&self) -> Vec<f64> {
        match &self.centers {
            Some(c) => c.clone(),
            None => linspace(self.start, self.end, self.detectors),
        }
    }

    /// 对散射网格分箱
    pub fn bin(&self, grid: &ScatGrid) -> BinnedPattern {
        let factor = self.dscs_factor();
        let half = self.bin_width / 2.0;

        let bins = self
            .centers()
            .into_iter()
            .enumerate()
            .map(|(index, center)| {
                let (sum, count) = grid
                    .points
                    .iter()
                    .filter(|p| p.theta >= center - half && p.theta < center + half)
                    .fold((0.0, 0usize), |(s, n), p| (s + p.s11 * factor, n + 1));

                Bin {
                    index,
                    center,
                    count,
                    mean: (count > 0).then(|| sum / count as f64),
                }
            })
            .collect();

        BinnedPattern {
            name: grid.name.clone(),
            wavelength: self.wavelength,
            bin_width: self.bin_width,
            bins,
        }
    }
}

/// 闭区间等间距取点
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScatPoint;

    fn uniform_grid(s11: f64) -> ScatGrid {
        let points = (0..=180)
            .map(|t| ScatPoint {
                theta: t as f64,
                phi: 0.0,
                s11,
            })
            .collect();
        ScatGrid {
            name: "uniform".into(),
            points,
        }
    }

    #[test]
    fn test_default_centers() {
        let c = PhipsConfig::default().centers();
        assert_eq!(c.len(), 20);
        assert!((c[0] - 18.0).abs() < 1e-12);
        assert!((c[1] - 26.0).abs() < 1e-12);
        assert!((c[19] - 170.0).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_edge_cases() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(5.0, 9.0, 1), vec![5.0]);
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_dscs_factor() {
        let cfg = PhipsConfig::default();
        let k = 2.0 * PI / 0.532;
        assert!((cfg.wavenumber() - k).abs() < 1e-12);
        assert!((cfg.dscs_factor() - 1e-12 / (k * k)).abs() < 1e-24);
    }

    #[test]
    fn test_uniform_binning() {
        let cfg = PhipsConfig::default();
        let pattern = cfg.bin(&uniform_grid(2.0));
        assert_eq!(pattern.bins.len(), 20);
        for bin in &pattern.bins {
            // [θ-4, θ+4) 内的整数角共 8 个
            assert_eq!(bin.count, 8);
            let mean = bin.mean.unwrap();
            assert!((mean - 2.0 * cfg.dscs_factor()).abs() < 1e-24);
        }
    }

    #[test]
    fn test_half_open_interval_and_mean() {
        let cfg = PhipsConfig {
            centers: Some(vec![10.0]),
            bin_width: 4.0,
            ..Default::default()
        };
        let grid = ScatGrid {
            name: "g".into(),
            points: vec![
                ScatPoint { theta: 8.0, phi: 0.0, s11: 1.0 },
                ScatPoint { theta: 11.9, phi: 0.0, s11: 3.0 },
                ScatPoint { theta: 12.0, phi: 0.0, s11: 100.0 },
            ],
        };
        let bin = &cfg.bin(&grid).bins[0];
        assert_eq!(bin.count, 2);
        assert!((bin.mean.unwrap() - 2.0 * cfg.dscs_factor()).abs() < 1e-24);
    }

    #[test]
    fn test_empty_bins_have_no_value() {
        let cfg = PhipsConfig::default();
        let grid = ScatGrid {
            name: "narrow".into(),
            points: vec![ScatPoint { theta: 20.0, phi: 0.0, s11: 1.0 }],
        };
        let pattern = cfg.bin(&grid);
        assert_eq!(pattern.filled(), 1);
        assert!(pattern.bins[0].mean.is_some());
        assert!(pattern.bins[1].mean.is_none());
        assert!(pattern.log_lines()[1].ends_with("no data points found"));
    }

    #[test]
    fn test_validation() {
        assert!(PhipsConfig::default().validate().is_ok());
        let bad = PhipsConfig {
            wavelength: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = PhipsConfig {
            start: 100.0,
            end: 50.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let custom = PhipsConfig {
            detectors: 0,
            centers: Some(vec![30.0]),
            ..Default::default()
        };
        assert!(custom.validate().is_ok());
    }
}
