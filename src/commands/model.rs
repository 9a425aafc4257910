//! # model 命令实现
//!
//! 读取 OBJ 粒子几何，输出摘要，并可选渲染旋转后的线框投影图。
//!
//! ## 依赖关系
//! - 使用 `cli/model.rs` 定义的 ModelArgs
//! - 使用 `parsers/obj.rs`, `phips/model_plot.rs`
//! - `print_mesh_summary` 被 `commands/run.rs` 复用

use crate::cli::model::{ImageFormat, ModelArgs};
use crate::error::Result;
use crate::models::{EulerAngles, Mesh};
use crate::parsers;
use crate::phips::model_plot;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 执行 model 命令
pub fn execute(args: ModelArgs) -> Result<()> {
    output::print_header("Particle Geometry");

    let mesh = parsers::parse_obj(&args.input)?;
    output::print_success(&format!(
        "3D model loaded successfully: {} ({} vertices, {} faces)",
        mesh.name,
        mesh.vertices.len(),
        mesh.faces.len()
    ));
    print_mesh_summary(&mesh);

    if let Some(out) = &args.output {
        let angles = EulerAngles::new(args.alpha, args.beta, args.gamma)?;
        let use_svg = match args.format {
            Some(f) => f == ImageFormat::Svg,
            None => is_svg(out),
        };
        model_plot::render_wireframe(
            &mesh,
            &angles,
            out,
            &mesh.name,
            args.width,
            args.height,
            use_svg,
        )?;
        output::print_success(&format!("Wireframe written to {}", out.display()));
    }

    Ok(())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

/// 打印网格摘要
pub fn print_mesh_summary(mesh: &Mesh) {
    #[derive(Tabled)]
    struct SummaryRow {
        #[tabled(rename = "Property")]
        key: &'static str,
        #[tabled(rename = "Value")]
        value: String,
    }

    let fmt3 = |v: [f64; 3]| format!("({:.4}, {:.4}, {:.4})", v[0], v[1], v[2]);

    let mut rows = vec![
        SummaryRow {
            key: "Vertices",
            value: mesh.vertices.len().to_string(),
        },
        SummaryRow {
            key: "Faces",
            value: mesh.faces.len().to_string(),
        },
        SummaryRow {
            key: "Edges",
            value: mesh.edges().len().to_string(),
        },
    ];

    if let Some((min, max)) = mesh.bounds() {
        rows.push(SummaryRow {
            key: "Bounds min",
            value: fmt3(min),
        });
        rows.push(SummaryRow {
            key: "Bounds max",
            value: fmt3(max),
        });
    }
    if let Some(center) = mesh.center() {
        rows.push(SummaryRow {
            key: "Centre",
            value: fmt3(center),
        });
    }
    if let Some(size) = mesh.size() {
        rows.push(SummaryRow {
            key: "Size",
            value: format!("{:.4}", size),
        });
    }

    println!("{}", Table::new(&rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_svg() {
        assert!(is_svg(Path::new("model.SVG")));
        assert!(!is_svg(Path::new("model.png")));
        assert!(!is_svg(Path::new("model")));
    }

    #[test]
    fn test_execute_summary_only() {
        let dir = tempfile::tempdir().unwrap();
        let obj = dir.path().join("rotated.obj");
        std::fs::write(&obj, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let args = ModelArgs {
            input: obj,
            output: None,
            format: None,
            alpha: 0.0,
            beta: 0.0,
            gamma: 0.0,
            width: 400,
            height: 400,
        };
        execute(args).unwrap();
    }

    #[test]
    fn test_execute_rejects_bad_angles() {
        let dir = tempfile::tempdir().unwrap();
        let obj = dir.path().join("rotated.obj");
        std::fs::write(&obj, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let args = ModelArgs {
            input: obj,
            output: Some(dir.path().join("out.svg")),
            format: None,
            alpha: 400.0,
            beta: 0.0,
            gamma: 0.0,
            width: 400,
            height: 400,
        };
        assert!(execute(args).is_err());
    }
}
