//! # 三维网格模型
//!
//! GOAD 输出的旋转后粒子几何 (`rotated.obj`) 的内存表示。
//!
//! ## 依赖关系
//! - 由 `parsers/obj.rs` 构造
//! - 被 `commands/model.rs` 和 `phips/model_plot.rs` 使用
//! - 使用 `models/orientation.rs` 旋转

use crate::models::EulerAngles;
use std::collections::BTreeSet;

/// 多边形网格
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<[f64; 3]>,
    /// 面，元素为 0 起始的顶点索引
    pub faces: Vec<Vec<usize>>,
}

impl Mesh {
    /// 包围盒 (min, max)
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        let first = *self.vertices.first()?;
        let mut min = first;
        let mut max = first;
        for v in &self.vertices {
            for k in 0..3 {
                min[k] = min[k].min(v[k]);
                max[k] = max[k].max(v[k]);
            }
        }
        Some((min, max))
    }

    /// 包围盒中心
    pub fn center(&self) -> Option<[f64; 3]> {
        let (min, max) = self.bounds()?;
        Some([
            (min[0] + max[0]) / 2.0,
            (min[1] + max[1]) / 2.0,
            (min[2] + max[2]) / 2.0,
        ])
    }

    /// 最大包围盒边长
    pub fn size(&self) -> Option<f64> {
        let (min, max) = self.bounds()?;
        Some((0..3).map(|k| max[k] - min[k]).fold(0.0, f64::max))
    }

    /// 以包围盒中心为原点旋转后的顶点
    pub fn rotated_vertices(&self, angles: &EulerAngles) -> Vec<[f64; 3]> {
        let c = self.center().unwrap_or([0.0; 3]);
        let r = angles.rotation_matrix();
        self.vertices
            .iter()
            .map(|v| {
                let p = [v[0] - c[0], v[1] - c[1], v[2] - c[2]];
                [
                    r[0][0] * p[0] + r[0][1] * p[1] + r[0][2] * p[2],
                    r[1][0] * p[0] + r[1][1] * p[1] + r[1][2] * p[2],
                    r[2][0] * p[0] + r[2][1] * p[1] + r[2][2] * p[2],
                ]
            })
            .collect()
    }

    /// 去重后的边（索引小者在前）
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut set = BTreeSet::new();
        for face in &self.faces {
            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                if a != b {
                    set.insert((a.min(b), a.max(b)));
                }
            }
        }
        set.into_iter().collect()
    }
}
