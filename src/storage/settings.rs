//! # 应用设置
//!
//! 以 JSON 保存默认命令和离散取向角。
//!
//! ## 文件格式
//! ```text
//! {
//!   "default_command": "goad --help",
//!   "use_discrete_angles": false,
//!   "alpha_value": 0.0,
//!   "beta_value": 0.0,
//!   "gamma_value": 0.0
//! }
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/run.rs`, `commands/config.rs` 使用
//! - 使用 `serde_json`, `dirs`

use crate::error::{LscatError, Result};
use crate::models::EulerAngles;
use crate::storage::text::{load_data, save_data};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 出厂默认命令
pub const FACTORY_DEFAULT_COMMAND: &str = "goad --help";

/// 设置文件名
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// 持久化设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_command: String,
    pub use_discrete_angles: bool,
    pub alpha_value: f64,
    pub beta_value: f64,
    pub gamma_value: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_command: FACTORY_DEFAULT_COMMAND.to_string(),
            use_discrete_angles: false,
            alpha_value: 0.0,
            beta_value: 0.0,
            gamma_value: 0.0,
        }
    }
}

impl Settings {
    /// 默认设置文件路径：`<config_dir>/lscat/settings.json`
    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join("lscat").join(SETTINGS_FILE_NAME),
            None => PathBuf::from(format!("lscat_{}", SETTINGS_FILE_NAME)),
        }
    }

    /// 严格读取；文件不存在时返回默认值
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let content = load_data(path)?;
        serde_json::from_str(&content).map_err(|e| LscatError::SettingsError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// 读取失败时退回默认值，并返回失败原因
    pub fn load_or_default(path: &Path) -> (Self, Option<LscatError>) {
        match Settings::load(path) {
            Ok(s) => (s, None),
            Err(e) => {
                tracing::warn!("Error loading settings from {}: {}", path.display(), e);
                (Settings::default(), Some(e))
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| LscatError::SettingsError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        save_data(&json, path)?;
        tracing::debug!("Settings saved to {}", path.display());
        Ok(())
    }

    /// 将命令设为新的默认命令
    pub fn save_as_default(&mut self, command: &str) -> Result<()> {
        let command = command.trim();
        if command.is_empty() {
            return Err(LscatError::EmptyCommand);
        }
        self.default_command = command.to_string();
        Ok(())
    }

    /// 恢复出厂默认命令
    pub fn factory_reset(&mut self) {
        self.default_command = FACTORY_DEFAULT_COMMAND.to_string();
    }

    /// 保存的角度（无论是否启用）
    pub fn angles(&self) -> Result<EulerAngles> {
        EulerAngles::new(self.alpha_value, self.beta_value, self.gamma_value)
    }

    /// 启用离散取向时返回角度
    pub fn discrete_angles(&self) -> Result<Option<EulerAngles>> {
        if self.use_discrete_angles {
            self.angles().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn set_angles(&mut self, angles: EulerAngles) {
        self.alpha_value = angles.alpha;
        self.beta_value = angles.beta;
        self.gamma_value = angles.gamma;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.default_command, FACTORY_DEFAULT_COMMAND);
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg/settings.json");

        let mut s = Settings::default();
        s.save_as_default("goad -w 0.532 --dir goad_run").unwrap();
        s.use_discrete_angles = true;
        s.set_angles(EulerAngles::new(10.0, 20.0, 30.0).unwrap());
        s.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, s);
        assert_eq!(
            loaded.discrete_angles().unwrap(),
            Some(EulerAngles::new(10.0, 20.0, 30.0).unwrap())
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"default_command": "goad run", "extra": 1}"#).unwrap();

        let s = Settings::load(&path).unwrap();
        assert_eq!(s.default_command, "goad run");
        assert!(!s.use_discrete_angles);
        assert_eq!(s.discrete_angles().unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(Settings::load(&path).is_err());
        let (s, err) = Settings::load_or_default(&path);
        assert_eq!(s, Settings::default());
        assert!(matches!(err, Some(LscatError::SettingsError { .. })));
    }

    #[test]
    fn test_empty_default_rejected() {
        let mut s = Settings::default();
        assert!(matches!(
            s.save_as_default("   "),
            Err(LscatError::EmptyCommand)
        ));
        assert_eq!(s.default_command, FACTORY_DEFAULT_COMMAND);
    }

    #[test]
    fn test_factory_reset() {
        let mut s = Settings::default();
        s.save_as_default("goad --custom").unwrap();
        s.factory_reset();
        assert_eq!(s.default_command, FACTORY_DEFAULT_COMMAND);
    }
}
