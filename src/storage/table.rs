//! # 数值表格读取
//!
//! 读取以空白/制表符分隔的数值文件，忽略注释与空行。
//! `mueller_scatgrid` 使用 `#` 注释，PHIPS 测量文件使用 `//` 注释。
//!
//! ## 依赖关系
//! - 被 `parsers/mueller.rs`, `parsers/reference.rs` 使用

use crate::models::Table;

/// 从字符串解析数值表格
pub fn parse_table(content: &str, comment: &str) -> std::result::Result<Table, String> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut columns = 0;

    for (lineno, raw) in content.lines().enumerate() {
        let line = match raw.find(comment) {
            Some(pos) if !comment.is_empty() => &raw[..pos],
            _ => raw,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>()
                    .map_err(|_| format!("line {}: invalid number '{}'", lineno + 1, tok))
            })
            .collect::<std::result::Result<Vec<f64>, String>>()?;

        if rows.is_empty() {
            columns = row.len();
        } else if row.len() != columns {
            return Err(format!(
                "line {}: expected {} columns, found {}",
                lineno + 1,
                columns,
                row.len()
            ));
        }

        rows.push(row);
    }

    if rows.is_empty() {
        return Err("no data rows".to_string());
    }

    Ok(Table { columns, rows })
}
