//! # config 命令实现
//!
//! 读写设置文件：默认命令、出厂重置和离散取向角。
//!
//! ## 依赖关系
//! - 使用 `cli/config.rs` 定义的 ConfigArgs
//! - 使用 `storage/settings.rs`

use crate::cli::config::{AnglesArgs, ConfigArgs, ConfigCommands};
use crate::error::{LscatError, Result};
use crate::models::EulerAngles;
use crate::runner::apply_discrete;
use crate::storage::settings::FACTORY_DEFAULT_COMMAND;
use crate::storage::Settings;
use crate::utils::output;

use std::path::Path;

/// 执行 config 命令
pub fn execute(args: ConfigArgs, settings_path: &Path) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show(settings_path),
        ConfigCommands::Path => {
            println!("{}", settings_path.display());
            Ok(())
        }
        ConfigCommands::SetDefault { command } => {
            // 设置文件损坏时放弃修改，不覆盖
            let mut settings = Settings::load(settings_path)?;
            settings.save_as_default(&command.join(" "))?;
            settings.save(settings_path)?;
            output::print_success(&format!(
                "Command saved as default: {}",
                settings.default_command
            ));
            Ok(())
        }
        ConfigCommands::FactoryReset => {
            let mut settings = Settings::load(settings_path)?;
            settings.factory_reset();
            settings.save(settings_path)?;
            output::print_success(&format!(
                "Default command reset to factory setting: {}",
                FACTORY_DEFAULT_COMMAND
            ));
            Ok(())
        }
        ConfigCommands::Angles(angles) => set_angles(angles, settings_path),
    }
}

fn show(path: &Path) -> Result<()> {
    let (settings, err) = Settings::load_or_default(path);
    if let Some(e) = err {
        output::print_warning(&format!("Showing defaults: {}", e));
    }

    output::print_header("lscat Settings");
    println!("  File:            {}", path.display());
    println!("  Default command: {}", settings.default_command);
    println!(
        "  Discrete angles: {}",
        if settings.use_discrete_angles { "enabled" } else { "disabled" }
    );
    println!(
        "  α, β, γ (°):     {:.1}, {:.1}, {:.1}",
        settings.alpha_value, settings.beta_value, settings.gamma_value
    );

    if let Ok(Some(angles)) = settings.discrete_angles() {
        println!(
            "  Preview:         {}",
            apply_discrete(&settings.default_command, &angles)
        );
    }
    Ok(())
}

fn set_angles(args: AnglesArgs, path: &Path) -> Result<()> {
    let mut settings = Settings::load(path)?;
    update_angles(&mut settings, &args)?;
    settings.save(path)?;

    let angles = settings.angles()?;
    if settings.use_discrete_angles {
        output::print_success(&format!("Discrete orientation enabled: {}", angles));
    } else {
        output::print_success(&format!(
            "Discrete orientation disabled (stored: {})",
            angles
        ));
    }
    Ok(())
}

/// 应用角度参数，未给出的角度保持不变
fn update_angles(settings: &mut Settings, args: &AnglesArgs) -> Result<()> {
    let no_change = !args.enable
        && !args.disable
        && args.alpha.is_none()
        && args.beta.is_none()
        && args.gamma.is_none();
    if no_change {
        return Err(LscatError::InvalidArgument(
            "nothing to change (use --enable, --disable, --alpha, --beta or --gamma)".to_string(),
        ));
    }

    let angles = EulerAngles::new(
        args.alpha.unwrap_or(settings.alpha_value),
        args.beta.unwrap_or(settings.beta_value),
        args.gamma.unwrap_or(settings.gamma_value),
    )?;
    settings.set_angles(angles);

    if args.enable {
        settings.use_discrete_angles = true;
    } else if args.disable {
        settings.use_discrete_angles = false;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angles_args() -> AnglesArgs {
        AnglesArgs {
            enable: false,
            disable: false,
            alpha: None,
            beta: None,
            gamma: None,
        }
    }

    #[test]
    fn test_update_angles_partial() {
        let mut settings = Settings::default();
        settings.set_angles(EulerAngles::new(1.0, 2.0, 3.0).unwrap());

        let mut args = angles_args();
        args.beta = Some(90.0);
        args.enable = true;
        update_angles(&mut settings, &args).unwrap();

        assert!(settings.use_discrete_angles);
        assert_eq!(
            (settings.alpha_value, settings.beta_value, settings.gamma_value),
            (1.0, 90.0, 3.0)
        );
    }

    #[test]
    fn test_update_angles_rejects_out_of_range() {
        let mut settings = Settings::default();
        let mut args = angles_args();
        args.gamma = Some(361.0);
        assert!(update_angles(&mut settings, &args).is_err());
        assert_eq!(settings.gamma_value, 0.0);
    }

    #[test]
    fn test_update_angles_requires_change() {
        let mut settings = Settings::default();
        assert!(update_angles(&mut settings, &angles_args()).is_err());
    }

    #[test]
    fn test_set_default_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lscat").join("settings.json");

        execute(
            ConfigArgs {
                command: ConfigCommands::SetDefault {
                    command: vec!["goad".into(), "-w".into(), "0.5".into()],
                },
            },
            &path,
        )
        .unwrap();
        assert_eq!(Settings::load(&path).unwrap().default_command, "goad -w 0.5");

        execute(
            ConfigArgs {
                command: ConfigCommands::FactoryReset,
            },
            &path,
        )
        .unwrap();
        assert_eq!(
            Settings::load(&path).unwrap().default_command,
            FACTORY_DEFAULT_COMMAND
        );
    }

    #[test]
    fn test_corrupt_settings_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = execute(
            ConfigArgs {
                command: ConfigCommands::FactoryReset,
            },
            &path,
        );
        assert!(matches!(result, Err(LscatError::SettingsError { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
        show(&path).unwrap();
    }
}
