//! # lscat - 光散射计算运行与 PHIPS 对比工具
//!
//! 运行 GOAD 等外部光散射程序，将 `mueller_scatgrid` 结果按 PHIPS 探测器
//! 角度分箱并与测量数据对比绘图。
//!
//! ## 子命令
//! - `run`    - 运行计算命令（可注入离散取向角），结束后自动绘图
//! - `plot`   - 分箱绘图（单文件 / 批量目录）
//! - `config` - 管理默认命令与取向角
//! - `model`  - 查看 / 渲染 OBJ 粒子几何
//! - `status` - 查看上一次运行记录
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── runner/    (子进程执行)
//!   │     ├── parsers/   (数据文件解析)
//!   │     ├── phips/     (分箱与绘图)
//!   │     ├── storage/   (设置与运行记录)
//!   │     └── models/    (数据模型)
//!   ├── batch/      (并行批量处理)
//!   ├── utils/      (输出、进度与日志)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod phips;
mod runner;
mod storage;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = utils::logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        utils::output::print_warning(&format!("Logging disabled: {}", e));
    }

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
