//! # 散射强度对比图
//!
//! 使用 `plotters` 绘制 GOAD 计算值与 PHIPS 测量值随散射角的变化（对数纵轴）。
//!
//! ## 功能
//! - 计算曲线：蓝色圆点连线，图例 `GOAD`
//! - 测量曲线：红色方块连线
//! - 无数据时输出 "No data loaded" 空图
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs`, `commands/run.rs` 调用
//! - 使用 `models/dataset.rs` 的 Series

use crate::error::{LscatError, Result};
use crate::models::Series;

use plotters::prelude::*;
use std::path::Path;

/// 默认图像文件
pub const DEFAULT_PLOT_FILE: &str = "phips_scattering.png";

const COMPUTED_COLOR: RGBColor = RGBColor(0, 0, 255);
const REFERENCE_COLOR: RGBColor = RGBColor(220, 0, 0);

/// 图表管理器
#[derive(Debug, Clone)]
pub struct PlotManager {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlotManager {
    fn default() -> Self {
        PlotManager {
            title: "PHIPS Scattering Intensity vs. Angle".to_string(),
            x_label: "Scattering Angle (degrees)".to_string(),
            y_label: "Mean DSCS".to_string(),
            width: 1000,
            height: 800,
        }
    }
}

impl PlotManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// 绘制计算值与（可选）测量值
    pub fn render(
        &self,
        computed: &Series,
        reference: Option<&Series>,
        output_path: &Path,
        use_svg: bool,
    ) -> Result<()> {
        let series: Vec<(&Series, Marker)> = std::iter::once((computed, Marker::Circle))
            .chain(reference.map(|r| (r, Marker::Square)))
            .collect();

        if use_svg {
            let root = SVGBackend::new(output_path, (self.width, self.height)).into_drawing_area();
            self.draw_chart(&root, &series)?;
            root.present().map_err(|e| LscatError::PlotError(e.to_string()))?;
        } else {
            let root =
                BitMapBackend::new(output_path, (self.width, self.height)).into_drawing_area();
            self.draw_chart(&root, &series)?;
            root.present().map_err(|e| LscatError::PlotError(e.to_string()))?;
        }

        tracing::debug!("Plot written to {}", output_path.display());
        Ok(())
    }

    fn draw_chart<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, plotters::coord::Shift>,
        series: &[(&Series, Marker)],
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)
            .map_err(|e| LscatError::PlotError(format!("{:?}", e)))?;

        let ranges = plot_ranges(series.iter().map(|(s, _)| *s));
        let title = if ranges.is_some() {
            self.title.as_str()
        } else {
            "No data loaded"
        };
        let ((x_min, x_max), (y_min, y_max)) = ranges.unwrap_or(((0.0, 180.0), (1e-3, 1.0)));

        let mut chart = ChartBuilder::on(root)
            .caption(title, ("sans-serif", 28).into_font())
            .margin(30)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(x_min..x_max, (y_min..y_max).log_scale())
            .map_err(|e| LscatError::PlotError(format!("{:?}", e)))?;

        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .y_label_formatter(&|y| format!("{:.0e}", y))
            .x_label_style(("sans-serif", 16))
            .y_label_style(("sans-serif", 16))
            .axis_desc_style(("sans-serif", 18))
            .light_line_style(RGBColor(220, 220, 220).stroke_width(1))
            .draw()
            .map_err(|e| LscatError::PlotError(format!("{:?}", e)))?;

        let mut labelled = false;
        for (s, marker) in series {
            let points: Vec<(f64, f64)> = s.positive_points().collect();
            if points.is_empty() {
                continue;
            }

            let color = match marker {
                Marker::Circle => COMPUTED_COLOR,
                Marker::Square => REFERENCE_COLOR,
            };

            chart
                .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
                .map_err(|e| LscatError::PlotError(format!("{:?}", e)))?
                .label(s.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
            labelled = true;

            match marker {
                Marker::Circle => chart.draw_series(
                    points
                        .iter()
                        .map(|&p| Circle::new(p, 5, color.filled())),
                ),
                Marker::Square => chart.draw_series(
                    points
                        .iter()
                        .map(|&p| EmptyElement::at(p) + Rectangle::new([(-4, -4), (4, 4)], color.filled())),
                ),
            }
            .map_err(|e| LscatError::PlotError(format!("{:?}", e)))?;
        }

        if labelled {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", 16))
                .draw()
                .map_err(|e| LscatError::PlotError(format!("{:?}", e)))?;
        }

        Ok(())
    }
}

/// 曲线点标记
#[derive(Debug, Clone, Copy)]
enum Marker {
    Circle,
    Square,
}

/// 所有可绘制点的坐标范围（留出边距）
fn plot_ranges<'a>(series: impl Iterator<Item = &'a Series>) -> Option<((f64, f64), (f64, f64))> {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    let mut any = false;

    for s in series {
        for (px, py) in s.positive_points() {
            any = true;
            x = (x.0.min(px), x.1.max(px));
            y = (y.0.min(py), y.1.max(py));
        }
    }

    if !any {
        return None;
    }

    let x_range = ((x.0 - 5.0).max(0.0), (x.1 + 5.0).min(180.0).max(x.0 + 1.0));
    let y_range = (y.0 / 2.0, y.1 * 2.0);
    Some((x_range, y_range))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_manager_defaults() {
        let pm = PlotManager::new();
        assert_eq!(pm.x_label, "Scattering Angle (degrees)");
        assert_eq!(pm.y_label, "Mean DSCS");
    }

    #[test]
    fn test_plot_ranges() {
        let a = Series::new("a", vec![(18.0, 1e-10), (170.0, 4e-12)]);
        let b = Series::new("b", vec![(30.0, 0.0), (42.0, 2e-9)]);
        let ((x0, x1), (y0, y1)) = plot_ranges([&a, &b].into_iter()).unwrap();
        assert_eq!((x0, x1), (13.0, 175.0));
        assert!((y0 - 2e-12).abs() < 1e-24);
        assert!((y1 - 4e-9).abs() < 1e-21);

        let empty = Series::new("e", vec![(10.0, 0.0)]);
        assert!(plot_ranges([&empty].into_iter()).is_none());
    }

    #[test]
    fn test_render_svg_with_reference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        let computed = Series::new("GOAD", vec![(18.0, 1e-10), (26.0, 5e-11), (34.0, 2e-11)]);
        let reference = Series::new("PHIPS (IMPACTS2022)", vec![(18.0, 2e-10), (26.0, 6e-11)]);

        PlotManager::new()
            .with_size(640, 480)
            .render(&computed, Some(&reference), &path, true)
            .unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("GOAD"));
    }

    #[test]
    fn test_render_empty_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        PlotManager::new()
            .render(&Series::new("GOAD", vec![]), None, &path, true)
            .unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("No data loaded"));
    }
}
