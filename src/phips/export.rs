//! # 分箱数据导出
//!
//! 导出 PHIPS 分箱结果到 CSV 和 XY 格式，空分箱写为 `nan`。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `models/dataset.rs` 的 BinnedPattern
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{LscatError, Result};
use crate::models::BinnedPattern;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn format_mean(mean: Option<f64>) -> String {
    match mean {
        Some(v) => format!("{:.6e}", v),
        None => "nan".to_string(),
    }
}

/// 导出为 CSV
pub fn to_csv(pattern: &BinnedPattern, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["theta_deg", "points", "mean_dscs"])?;
    for bin in &pattern.bins {
        wtr.write_record([
            format!("{:.3}", bin.center),
            bin.count.to_string(),
            format_mean(bin.mean),
        ])?;
    }

    wtr.flush().map_err(|e| LscatError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出为 XY
pub fn to_xy(pattern: &BinnedPattern, output_path: &Path) -> Result<()> {
    let write_err = |e: std::io::Error| LscatError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut w = BufWriter::new(file);

    writeln!(w, "# PHIPS-binned GOAD pattern: {}", pattern.name).map_err(write_err)?;
    writeln!(w, "# Wavelength: {} um", pattern.wavelength).map_err(write_err)?;
    writeln!(w, "# Bin width: {} deg", pattern.bin_width).map_err(write_err)?;
    writeln!(w, "# Columns: theta (degrees), mean DSCS").map_err(write_err)?;

    for bin in &pattern.bins {
        writeln!(w, "{:.3}\t{}", bin.center, format_mean(bin.mean)).map_err(write_err)?;
    }
    w.flush().map_err(write_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bin;

    fn pattern() -> BinnedPattern {
        BinnedPattern {
            name: "goad_run".into(),
            wavelength: 0.532,
            bin_width: 8.0,
            bins: vec![
                Bin { index: 0, center: 18.0, count: 8, mean: Some(1.25e-10) },
                Bin { index: 1, center: 26.0, count: 0, mean: None },
            ],
        }
    }

    #[test]
    fn test_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bins.csv");
        to_csv(&pattern(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "theta_deg,points,mean_dscs");
        assert_eq!(lines[1], "18.000,8,1.250000e-10");
        assert_eq!(lines[2], "26.000,0,nan");
    }

    #[test]
    fn test_xy_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bins.xy");
        to_xy(&pattern(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# PHIPS-binned GOAD pattern: goad_run\n"));
        assert!(text.contains("18.000\t1.250000e-10\n"));
        assert!(text.ends_with("26.000\tnan\n"));
    }
}
