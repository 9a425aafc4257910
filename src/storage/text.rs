//! # 文本存储
//!
//! 整文件读写，写入时自动创建父目录。
//!
//! ## 依赖关系
//! - 被 `storage/record.rs`, `storage/settings.rs`, `storage/table.rs` 使用

use crate::error::{LscatError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// 将字符串写入文件
pub fn save_data(data: &str, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, data).map_err(|e| LscatError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 读取整个文件
pub fn load_data(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LscatError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => LscatError::FileReadError {
            path: path.display().to_string(),
            source: e,
        },
    })
}

/// 创建父目录（如果需要）
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| LscatError::FileWriteError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}
