//! # 取向欧拉角
//!
//! GOAD `--discrete` 参数使用的 (α, β, γ) 欧拉角，单位为度，ZYZ 约定。
//!
//! ## 依赖关系
//! - 被 `runner/command.rs` 用于拼接命令参数
//! - 被 `models/mesh.rs` 用于旋转模型
//! - 被 `storage/settings.rs` 持久化

use crate::error::{LscatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 单个角度允许的范围 (°)
pub const ANGLE_MIN: f64 = 0.0;
pub const ANGLE_MAX: f64 = 360.0;

/// 欧拉角 (°)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl EulerAngles {
    /// 创建并校验角度范围
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        for (name, value) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
            if !value.is_finite() || !(ANGLE_MIN..=ANGLE_MAX).contains(&value) {
                return Err(LscatError::InvalidAngles(format!(
                    "{} = {} (must be within {}-{}°)",
                    name, value, ANGLE_MIN, ANGLE_MAX
                )));
            }
        }
        Ok(EulerAngles { alpha, beta, gamma })
    }

    /// 旋转矩阵 R = Rz(α)·Ry(β)·Rz(γ)
    pub fn rotation_matrix(&self) -> [[f64; 3]; 3] {
        let (sa, ca) = self.alpha.to_radians().sin_cos();
        let (sb, cb) = self.beta.to_radians().sin_cos();
        let (sg, cg) = self.gamma.to_radians().sin_cos();

        [
            [ca * cb * cg - sa * sg, -ca * cb * sg - sa * cg, ca * sb],
            [sa * cb * cg + ca * sg, -sa * cb * sg + ca * cg, sa * sb],
            [-sb * cg, sb * sg, cb],
        ]
    }
}

impl fmt::Display for EulerAngles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1},{:.1},{:.1}", self.alpha, self.beta, self.gamma)
    }
}

impl FromStr for EulerAngles {
    type Err = LscatError;

    /// 解析 "α,β,γ"
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
        if parts.len() != 3 {
            return Err(LscatError::InvalidAngles(format!(
                "'{}' (expected alpha,beta,gamma)",
                s
            )));
        }

        let mut values = [0.0; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| LscatError::InvalidAngles(format!("'{}' is not a number", part)))?;
        }

        EulerAngles::new(values[0], values[1], values[2])
    }
}
