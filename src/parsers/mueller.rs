//! # GOAD mueller_scatgrid 解析器
//!
//! ## 格式说明
//! ```text
//! theta phi s11 s12 s13 s14 s21 ... s44
//! 0.0   0.0 1.23e5 ...
//! ...
//! ```
//! 空白分隔的数值列，`#` 之后为注释。只使用前三列。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 使用
//! - 使用 `storage/table.rs`, `models/dataset.rs`

use crate::error::{LscatError, Result};
use crate::models::{ScatGrid, ScatPoint, Table};
use crate::storage::load_data;
use crate::storage::table::parse_table;
use std::path::Path;

/// 格式名称（用于错误信息）
pub const FORMAT: &str = "mueller_scatgrid";

/// 默认文件名
pub const FILE_NAME: &str = "mueller_scatgrid";

/// 读取 mueller_scatgrid 文件
pub fn parse_scatgrid(path: &Path) -> Result<ScatGrid> {
    let content = load_data(path)?;
    parse_scatgrid_content(&content, &grid_name(path))
        .map_err(|reason| LscatError::parse(FORMAT, path, reason))
}

/// 从字符串内容解析
pub fn parse_scatgrid_content(content: &str, name: &str) -> std::result::Result<ScatGrid, String> {
    from_table(parse_table(content, "#")?, name)
}

fn from_table(table: Table, name: &str) -> std::result::Result<ScatGrid, String> {
    if table.columns < 3 {
        return Err(format!(
            "expected at least 3 columns (theta, phi, S11), found {}",
            table.columns
        ));
    }

    let points = table
        .rows
        .iter()
        .map(|r| ScatPoint {
            theta: r[0],
            phi: r[1],
            s11: r[2],
        })
        .collect();

    Ok(ScatGrid {
        name: name.to_string(),
        points,
    })
}

/// 数据名称
///
/// `<dir>/mueller_scatgrid` 取目录名，`<dir>/mueller_scatgrid_1d` 取 `<dir>_1d`，
/// 其他文件取文件名。
pub fn grid_name(path: &Path) -> String {
    let file = path.file_name().and_then(|n| n.to_str()).unwrap_or("scatgrid");
    let dir = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str());

    match (dir, grid_suffix(file)) {
        (Some(dir), Some("")) => dir.to_string(),
        (Some(dir), Some(suffix)) => format!("{}_{}", dir, suffix),
        _ => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file)
            .to_string(),
    }
}

/// `mueller_scatgrid` 返回空后缀，`mueller_scatgrid_<x>` 返回 `x`
pub fn grid_suffix(file: &str) -> Option<&str> {
    let rest = file.strip_prefix(FILE_NAME)?;
    if rest.is_empty() {
        Some("")
    } else {
        rest.strip_prefix('_').filter(|s| !s.is_empty())
    }
}
