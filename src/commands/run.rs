//! # run 命令实现
//!
//! 运行外部散射计算（默认 GOAD），实时回显输出，结束后检查结果并自动绘图。
//!
//! ## 流程
//! 1. 命令取自参数或设置中的默认命令
//! 2. 按需注入 `--discrete α,β,γ`
//! 3. 启动子进程，逐行回显 stdout/stderr（stderr 为红色）
//! 4. 保存运行记录到输出目录
//! 5. 成功时查找 `mueller_scatgrid` 并绘图，查找 OBJ 模型并输出摘要
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的 RunArgs
//! - 使用 `runner/` 执行命令，`storage/` 读写设置和运行记录
//! - 复用 `commands/plot.rs`, `commands/model.rs`

use crate::cli::run::RunArgs;
use crate::commands::{model, plot};
use crate::error::{LscatError, Result};
use crate::models::RunOutcome;
use crate::parsers::{self, mueller};
use crate::runner::{apply_discrete, ensure_success, CommandLine, RunEvent, SubprocessRunner};
use crate::storage::{save_run_record, Settings};
use crate::utils::{output, progress};

use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 子进程长时间未结束时的提示
const HANGING_NOTICE: &str = "Process seems to be taking too long. It might be hanging.";

/// 执行 run 命令
pub fn execute(args: RunArgs, settings_path: &Path) -> Result<()> {
    // 要写回设置时严格读取，避免覆盖损坏的设置文件
    let mut settings = if args.save_default {
        Settings::load(settings_path)?
    } else {
        let (settings, load_err) = Settings::load_or_default(settings_path);
        if let Some(e) = load_err {
            output::print_warning(&format!("Using default settings: {}", e));
        }
        settings
    };

    let command_text = compose_command(&args, &settings)?;

    if args.save_default {
        settings.save_as_default(&command_text)?;
        if let Some(angles) = args.discrete {
            settings.use_discrete_angles = true;
            settings.set_angles(angles);
        }
        settings.save(settings_path)?;
        output::print_success(&format!("Saved default command: {}", command_text));
    }

    let cmd = CommandLine::parse(&command_text)?;

    let runner = SubprocessRunner::new()
        .with_warn_after(match args.warn_after {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        })
        .with_timeout(args.timeout.map(Duration::from_secs))
        .with_current_dir(args.cwd.clone());

    output::print_command(&command_text);
    output::print_info("Running command...");

    let outcome = run_with_spinner(&runner, &cmd)?;

    let output_dir = resolve(args.cwd.as_deref(), &args.output_dir);
    if !args.no_record {
        match save_run_record(&output_dir, &outcome) {
            Ok((log_path, _)) => tracing::info!("Run record saved to {}", log_path.display()),
            Err(e) => output::print_warning(&format!("Could not save run record: {}", e)),
        }
    }

    if outcome.timed_out {
        output::print_error(&format!(
            "Command killed after {}s timeout",
            args.timeout.unwrap_or(0)
        ));
    }

    if !outcome.success() {
        if let Some(code) = outcome.exit_code {
            output::print_error(&format!("Command failed with exit code: {}", code));
        }
        return ensure_success(&outcome, args.timeout.map(Duration::from_secs));
    }

    output::print_success(&format!(
        "Command completed successfully. ({:.1}s)",
        outcome.duration_secs
    ));

    report_results(&args, &output_dir);
    Ok(())
}

/// 组合最终执行的命令文本
fn compose_command(args: &RunArgs, settings: &Settings) -> Result<String> {
    let base = if args.command.is_empty() {
        settings.default_command.trim().to_string()
    } else if args.command.len() == 1 {
        // 整条命令作为一个参数传入（如 `lscat run "goad -w 0.5"`）
        args.command[0].trim().to_string()
    } else {
        CommandLine::new(args.command[0].clone(), args.command[1..].to_vec()).to_string()
    };

    if base.is_empty() {
        return Err(LscatError::EmptyCommand);
    }

    let angles = match args.discrete {
        Some(angles) => Some(angles),
        None if args.no_discrete => None,
        None => settings.discrete_angles()?,
    };

    Ok(match angles {
        Some(angles) => apply_discrete(&base, &angles),
        None => base,
    })
}

/// 带进度指示执行，输出打印在指示器上方
fn run_with_spinner(runner: &SubprocessRunner, cmd: &CommandLine) -> Result<RunOutcome> {
    let pb = progress::create_spinner(&format!("Running {}", cmd.program));

    let result = runner.run(cmd, |event| match event {
        RunEvent::Output(line) => {
            pb.println(output::format_stream_line(line.text(), line.is_error()));
        }
        RunEvent::Hanging { elapsed } => {
            tracing::warn!("No exit after {}s", elapsed.as_secs());
            pb.println(output::format_stream_line(HANGING_NOTICE, true));
        }
        RunEvent::Killed { elapsed } => {
            pb.println(format!(
                "{} Timeout reached after {}s, terminating process",
                "[ERR]".red().bold(),
                elapsed.as_secs()
            ));
        }
    });

    pb.finish_and_clear();
    result
}

/// 检查输出文件：绘图并显示模型摘要
fn report_results(args: &RunArgs, output_dir: &Path) {
    let mueller_file = output_dir.join(mueller::FILE_NAME);
    if mueller_file.is_file() {
        output::print_info(&format!("Found output file: {}", mueller_file.display()));
        if args.no_plot {
            output::print_skip("Automatic plotting disabled (--no-plot)");
        } else {
            output::print_info("Generating plot automatically...");
            let plot_output = resolve(args.cwd.as_deref(), &args.plot_output);
            match auto_plot(args, &mueller_file, &plot_output) {
                Ok(()) => output::print_success(&format!(
                    "Plot generated successfully: {}",
                    plot_output.display()
                )),
                Err(e) => output::print_error(&format!("Error generating plot: {}", e)),
            }
        }
    } else {
        output::print_error(&format!("Output file not found: {}", mueller_file.display()));
        output::print_error("Cannot generate plot: Output file not found.");
    }

    let obj_file = resolve(args.cwd.as_deref(), &args.obj);
    if obj_file.is_file() {
        output::print_info(&format!("Found 3D model file: {}", obj_file.display()));
        match parsers::parse_obj(&obj_file) {
            Ok(mesh) => model::print_mesh_summary(&mesh),
            Err(e) => output::print_error(&format!("Error loading 3D model: {}", e)),
        }
    } else {
        output::print_warning(&format!("3D model file not found: {}", obj_file.display()));
    }
}

fn auto_plot(args: &RunArgs, mueller_file: &Path, plot_output: &Path) -> Result<()> {
    let job = plot::PlotJob::from_options(&args.plot, args.cwd.as_deref())?;
    let format = plot::format_from_path(plot_output);
    let pattern = job.process(mueller_file, plot_output, format)?;
    plot::print_bin_table(&pattern);
    for line in pattern.log_lines() {
        println!("{}", line);
    }
    Ok(())
}

/// 相对路径相对于命令工作目录解析
fn resolve(cwd: Option<&Path>, path: &Path) -> PathBuf {
    match cwd {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}
