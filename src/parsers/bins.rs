//! # PHIPS 分箱配置解析器
//!
//! ## 格式说明
//! ```toml
//! bins = [18.0, 26.0, 34.0, 42.0]
//! ```
//! `bins` 为探测器中心角 (°) 列表，覆盖默认的等间距分箱。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 使用
//! - 使用 `toml`

use crate::error::{LscatError, Result};
use crate::storage::load_data;
use serde::Deserialize;
use std::path::Path;

pub const FORMAT: &str = "bins TOML";

/// 默认分箱文件
pub const DEFAULT_BINS_FILE: &str = "phips_bins.toml";

#[derive(Debug, Deserialize)]
struct BinsFile {
    bins: Option<Vec<f64>>,
}

/// 读取分箱中心
pub fn parse_bins(path: &Path) -> Result<Vec<f64>> {
    let content = load_data(path)?;
    parse_bins_content(&content).map_err(|reason| LscatError::parse(FORMAT, path, reason))
}

pub fn parse_bins_content(content: &str) -> std::result::Result<Vec<f64>, String> {
    let file: BinsFile = toml::from_str(content).map_err(|e| e.to_string())?;
    let bins = file.bins.ok_or_else(|| "No 'bins' key".to_string())?;

    if bins.is_empty() {
        return Err("'bins' is empty".to_string());
    }
    if let Some(bad) = bins.iter().find(|b| !b.is_finite() || **b < 0.0 || **b > 180.0) {
        return Err(format!("bin centre {} outside 0-180°", bad));
    }

    Ok(bins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bins() {
        let bins = parse_bins_content("bins = [18.0, 26, 34.5]\n").unwrap();
        assert_eq!(bins, vec![18.0, 26.0, 34.5]);
    }

    #[test]
    fn test_missing_key() {
        let err = parse_bins_content("centres = [1.0]\n").unwrap_err();
        assert_eq!(err, "No 'bins' key");
    }

    #[test]
    fn test_invalid_values() {
        assert!(parse_bins_content("bins = [\"a\"]\n").is_err());
        assert!(parse_bins_content("bins = [200.0]\n").is_err());
        assert!(parse_bins_content("bins = []\n").is_err());
    }
}
