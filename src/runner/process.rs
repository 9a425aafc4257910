//! # 子进程执行器
//!
//! 启动外部程序，逐行转发 stdout/stderr，并在运行过久时提示或终止。
//!
//! ## 功能
//! - 两个读取线程分别排空 stdout/stderr，避免管道写满阻塞子进程
//! - 运行超过 `warn_after` 时发出一次“可能卡住”提示
//! - 可选硬超时：超时后杀死子进程
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `runner/command.rs` 的 CommandLine
//! - 产生 `models/run.rs` 的 RunOutcome

use crate::error::{LscatError, Result};
use crate::models::{OutputLine, RunOutcome};
use crate::runner::CommandLine;

use chrono::Utc;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// 默认“可能卡住”提示时间
pub const DEFAULT_WARN_AFTER: Duration = Duration::from_secs(100);

/// 轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// 杀死子进程后等待管道关闭的时间
const KILL_GRACE: Duration = Duration::from_secs(2);

/// 运行过程中的事件
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// 一行输出
    Output(OutputLine),
    /// 运行时间超过提示阈值
    Hanging { elapsed: Duration },
    /// 超过硬超时，子进程已被终止
    Killed { elapsed: Duration },
}

/// 外部命令执行器
#[derive(Debug, Clone)]
pub struct SubprocessRunner {
    warn_after: Option<Duration>,
    timeout: Option<Duration>,
    current_dir: Option<PathBuf>,
}

impl Default for SubprocessRunner {
    fn default() -> Self {
        SubprocessRunner {
            warn_after: Some(DEFAULT_WARN_AFTER),
            timeout: None,
            current_dir: None,
        }
    }
}

impl SubprocessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置提示阈值（None 关闭提示）
    pub fn with_warn_after(mut self, warn_after: Option<Duration>) -> Self {
        self.warn_after = warn_after;
        self
    }

    /// 设置硬超时
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 设置工作目录
    pub fn with_current_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.current_dir = dir;
        self
    }

    /// 执行命令并收集输出
    ///
    /// 非零退出码不视为错误，调用方通过 `RunOutcome::success` 判断。
    pub fn run<F>(&self, cmd: &CommandLine, mut on_event: F) -> Result<RunOutcome>
    where
        F: FnMut(&RunEvent),
    {
        let command_text = cmd.to_string();
        tracing::info!("Executing: {} with args: {:?}", cmd.program, cmd.args);

        let mut process = Command::new(&cmd.program);
        process
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.current_dir {
            process.current_dir(dir);
        }

        let started_at = Utc::now();
        let start = Instant::now();

        let mut child = process.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => LscatError::CommandNotFound {
                command: cmd.program.clone(),
            },
            _ => LscatError::SpawnFailed {
                command: command_text.clone(),
                source: e,
            },
        })?;

        let (tx, rx) = mpsc::channel::<OutputLine>();
        let mut readers: Vec<JoinHandle<()>> = Vec::new();
        if let Some(out) = child.stdout.take() {
            readers.push(spawn_reader(out, tx.clone(), OutputLine::Stdout));
        }
        if let Some(err) = child.stderr.take() {
            readers.push(spawn_reader(err, tx.clone(), OutputLine::Stderr));
        }
        drop(tx);

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut combined = Vec::new();
        let mut warned = false;
        let mut killed_at: Option<Instant> = None;
        let mut drained = false;

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(line) => {
                    match &line {
                        OutputLine::Stdout(s) => push_line(&mut stdout, s),
                        OutputLine::Stderr(s) => push_line(&mut stderr, s),
                    }
                    on_event(&RunEvent::Output(line.clone()));
                    combined.push(line);
                    continue;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    drained = true;
                    break;
                }
            }

            let elapsed = start.elapsed();

            if let Some(killed) = killed_at {
                // 孙进程可能仍持有管道
                if killed.elapsed() >= KILL_GRACE {
                    tracing::warn!("Output pipes still open after kill, detaching readers");
                    break;
                }
                continue;
            }

            if let Some(limit) = self.warn_after {
                if !warned && elapsed >= limit {
                    warned = true;
                    on_event(&RunEvent::Hanging { elapsed });
                }
            }

            if let Some(limit) = self.timeout {
                if elapsed >= limit {
                    tracing::warn!("Timeout reached after {:?}, killing '{}'", elapsed, cmd.program);
                    if let Err(e) = child.kill() {
                        tracing::warn!("Failed to kill child process: {}", e);
                    }
                    killed_at = Some(Instant::now());
                    on_event(&RunEvent::Killed { elapsed });
                }
            }
        }

        let status = child.wait().map_err(|e| LscatError::Other(format!(
            "Failed to wait for '{}': {}",
            command_text, e
        )))?;

        if drained {
            for handle in readers {
                let _ = handle.join();
            }
        }

        let timed_out = killed_at.is_some();
        let outcome = RunOutcome {
            command: command_text,
            program: cmd.program.clone(),
            args: cmd.args.clone(),
            exit_code: if timed_out { None } else { status.code() },
            started_at,
            duration_secs: start.elapsed().as_secs_f64(),
            timed_out,
            stdout,
            stderr,
            combined,
        };

        tracing::debug!(
            "'{}' finished: exit={:?}, {:.2}s",
            outcome.program,
            outcome.exit_code,
            outcome.duration_secs
        );

        Ok(outcome)
    }
}

/// 将失败的运行结果转换为错误
pub fn ensure_success(outcome: &RunOutcome, timeout: Option<Duration>) -> Result<()> {
    if outcome.timed_out {
        return Err(LscatError::CommandTimedOut {
            command: outcome.command.clone(),
            secs: timeout.map(|t| t.as_secs()).unwrap_or(0),
        });
    }
    match outcome.exit_code {
        Some(0) => Ok(()),
        Some(code) => Err(LscatError::CommandFailed {
            command: outcome.command.clone(),
            code,
        }),
        None => Err(LscatError::CommandTerminated {
            command: outcome.command.clone(),
        }),
    }
}

fn push_line(buf: &mut String, line: &str) {
    buf.push_str(line);
    buf.push('\n');
}

/// 逐行读取管道，非 UTF-8 字节以替换字符显示
fn spawn_reader<R>(pipe: R, tx: Sender<OutputLine>, wrap: fn(String) -> OutputLine) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let text = String::from_utf8_lossy(&buf);
                    let text = text.trim_end_matches(['\n', '\r']).to_string();
                    if tx.send(wrap(text)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!("Pipe read error: {}", e);
                    break;
                }
            }
        }
    })
}
