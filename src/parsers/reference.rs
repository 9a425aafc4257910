//! # PHIPS 测量数据解析器
//!
//! ## 格式说明
//! ```text
//! // Plate crystal, IMPACTS 2022 RF02
//! // angle   mean_dscs
//! 18	1.23e-10
//! 26	8.40e-11
//! ```
//! 制表符/空白分隔，`//` 之后为注释；第一列为散射角，第二列为强度。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 使用
//! - 使用 `storage/table.rs`

use crate::error::{LscatError, Result};
use crate::models::{Series, Table};
use crate::storage::load_data;
use crate::storage::table::parse_table;
use std::path::Path;

pub const FORMAT: &str = "PHIPS reference";

/// 默认测量数据文件
pub const DEFAULT_REFERENCE_FILE: &str = "Plate_Crystal_IMPACTS2022_RF02_3606.txt";

/// 默认图例
pub const DEFAULT_LABEL: &str = "PHIPS (IMPACTS2022)";

/// 读取测量数据
pub fn parse_reference(path: &Path, label: &str) -> Result<Series> {
    let content = load_data(path)?;
    parse_reference_content(&content, label).map_err(|reason| LscatError::parse(FORMAT, path, reason))
}

/// 从字符串内容解析
pub fn parse_reference_content(content: &str, label: &str) -> std::result::Result<Series, String> {
    from_table(&parse_table(content, "//")?, label)
}

fn from_table(table: &Table, label: &str) -> std::result::Result<Series, String> {
    if table.columns < 2 {
        return Err(format!(
            "expected at least 2 columns (angle, value), found {}",
            table.columns
        ));
    }
    let points = table.rows.iter().map(|r| (r[0], r[1])).collect();
    Ok(Series::new(label, points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference() {
        let content = "// PHIPS\n// angle value stdev\n18\t1.5e-10\t1e-12\n26\t9.0e-11\t1e-12\n";
        let s = parse_reference_content(content, DEFAULT_LABEL).unwrap();
        assert_eq!(s.label, DEFAULT_LABEL);
        assert_eq!(s.points, vec![(18.0, 1.5e-10), (26.0, 9.0e-11)]);
    }

    #[test]
    fn test_single_column_rejected() {
        assert!(parse_reference_content("18\n26\n", DEFAULT_LABEL).is_err());
    }
}
