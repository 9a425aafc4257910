//! # 粒子几何线框图
//!
//! 将 OBJ 网格按欧拉角旋转后正交投影到 x-y 平面，绘制线框。
//!
//! ## 依赖关系
//! - 被 `commands/model.rs` 调用
//! - 使用 `models/mesh.rs`, `models/orientation.rs`

use crate::error::{LscatError, Result};
use crate::models::{EulerAngles, Mesh};

use plotters::prelude::*;
use std::path::Path;

/// 生成线框图
pub fn render_wireframe(
    mesh: &Mesh,
    angles: &EulerAngles,
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    let projected = project(mesh, angles);
    let edges = mesh.edges();

    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_wireframe(&root, &projected, &edges, title, angles)?;
        root.present().map_err(|e| LscatError::PlotError(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_wireframe(&root, &projected, &edges, title, angles)?;
        root.present().map_err(|e| LscatError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// 旋转并投影到 (x, y)
pub fn project(mesh: &Mesh, angles: &EulerAngles) -> Vec<(f64, f64)> {
    mesh.rotated_vertices(angles)
        .into_iter()
        .map(|v| (v[0], v[1]))
        .collect()
}

/// 对称的正方形视窗半宽
fn half_extent(points: &[(f64, f64)]) -> f64 {
    let r = points
        .iter()
        .map(|(x, y)| x.abs().max(y.abs()))
        .fold(0.0, f64::max);
    if r > 0.0 {
        r * 1.1
    } else {
        1.0
    }
}

fn draw_wireframe<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    projected: &[(f64, f64)],
    edges: &[(usize, usize)],
    title: &str,
    angles: &EulerAngles,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| LscatError::PlotError(format!("{:?}", e)))?;

    let r = half_extent(projected);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-r..r, -r..r)
        .map_err(|e| LscatError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .light_line_style(RGBColor(235, 235, 235).stroke_width(1))
        .draw()
        .map_err(|e| LscatError::PlotError(format!("{:?}", e)))?;

    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(edges.iter().map(|&(a, b)| {
            PathElement::new(vec![projected[a], projected[b]], line_color.stroke_width(1))
        }))
        .map_err(|e| LscatError::PlotError(format!("{:?}", e)))?;

    chart
        .draw_series(std::iter::once(Text::new(
            format!("α,β,γ = {}", angles),
            (-r * 0.95, r * 0.92),
            ("sans-serif", 14).into_font().color(&BLACK),
        )))
        .map_err(|e| LscatError::PlotError(format!("{:?}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_centres_model() {
        let mesh = Mesh {
            name: "bar".into(),
            vertices: vec![[10.0, 0.0, 0.0], [12.0, 0.0, 0.0], [12.0, 2.0, 0.0]],
            faces: vec![vec![0, 1, 2]],
        };
        let p = project(&mesh, &EulerAngles::default());
        assert_eq!(p, vec![(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0)]);
        assert!((half_extent(&p) - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_half_extent_degenerate() {
        assert_eq!(half_extent(&[]), 1.0);
        assert_eq!(half_extent(&[(0.0, 0.0)]), 1.0);
    }
}
