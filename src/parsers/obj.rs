//! # Wavefront OBJ 解析器
//!
//! 读取 GOAD 输出的粒子几何 (`rotated.obj`)。
//!
//! ## 格式说明
//! ```text
//! # comment
//! v x y z
//! f i j k ...        (i, i/t, i//n, i/t/n；1 起始，负数表示倒数)
//! ```
//! 其他记录（vn, vt, o, g, s, usemtl ...）忽略。
//!
//! ## 依赖关系
//! - 被 `commands/model.rs`, `commands/run.rs` 使用
//! - 使用 `models/mesh.rs`

use crate::error::{LscatError, Result};
use crate::models::Mesh;
use crate::storage::load_data;
use std::path::Path;

pub const FORMAT: &str = "OBJ";

/// GOAD 输出的旋转后几何文件
pub const DEFAULT_OBJ_FILE: &str = "rotated.obj";

/// 解析 OBJ 文件
pub fn parse_obj(path: &Path) -> Result<Mesh> {
    let content = load_data(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("model");
    parse_obj_content(&content, name).map_err(|reason| LscatError::parse(FORMAT, path, reason))
}

/// 从字符串解析 OBJ
pub fn parse_obj_content(content: &str, name: &str) -> std::result::Result<Mesh, String> {
    let mut mesh = Mesh {
        name: name.to_string(),
        ..Default::default()
    };

    for (lineno, raw) in content.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        let mut parts = line.split_whitespace();

        match parts.next() {
            Some("v") => {
                let coords: Vec<f64> = parts
                    .take(3)
                    .map(|t| t.parse::<f64>())
                    .collect::<std::result::Result<_, _>>()
                    .map_err(|_| format!("line {}: invalid vertex '{}'", lineno + 1, line))?;
                if coords.len() != 3 {
                    return Err(format!("line {}: vertex needs 3 coordinates", lineno + 1));
                }
                mesh.vertices.push([coords[0], coords[1], coords[2]]);
            }
            Some("f") => {
                let face = parts
                    .map(|t| resolve_index(t, mesh.vertices.len()))
                    .collect::<std::result::Result<Vec<usize>, String>>()
                    .map_err(|e| format!("line {}: {}", lineno + 1, e))?;
                if face.len() < 3 {
                    return Err(format!("line {}: face needs at least 3 vertices", lineno + 1));
                }
                mesh.faces.push(face);
            }
            _ => {}
        }
    }

    Ok(mesh)
}

/// 将 OBJ 面索引转换为 0 起始索引
fn resolve_index(token: &str, n_vertices: usize) -> std::result::Result<usize, String> {
    let first = token.split('/').next().unwrap_or("");
    let idx: i64 = first
        .parse()
        .map_err(|_| format!("invalid face index '{}'", token))?;

    let resolved = if idx > 0 {
        idx - 1
    } else if idx < 0 {
        n_vertices as i64 + idx
    } else {
        return Err("face index 0 is not valid".to_string());
    };

    if resolved < 0 || resolved as usize >= n_vertices {
        return Err(format!(
            "face index {} out of range ({} vertices)",
            idx, n_vertices
        ));
    }
    Ok(resolved as usize)
}
