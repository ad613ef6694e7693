//! # Command Execution Module / 命令执行模块
//!
//! Spawns the test runner and captures its combined output.
//!
//! 启动测试运行器并捕获其合并输出。

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::core::error::AdapterError;
use crate::core::models::RunSpec;

/// Spawns a command, captures its stdout and stderr.
/// The output streams are read concurrently and combined into a single string.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The combined stdout and stderr as a `String`.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
/// 输出流被并发读取并合并到一个字符串中。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> (std::io::Result<ExitStatus>, String) {
    let mut child = match cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).spawn() {
        Ok(child) => child,
        Err(e) => return (Err(e), String::new()),
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return (
            Err(std::io::Error::other("failed to capture runner output")),
            String::new(),
        );
    };

    // Both readers append to the same buffer, so lines keep their arrival order.
    // 两个读取任务追加到同一个缓冲区，因此行保持到达顺序。
    let output = Arc::new(tokio::sync::Mutex::new(String::new()));

    let stdout_output = Arc::clone(&output);
    let stdout_handle = tokio::spawn(async move {
        let mut lines = BufReader::new(stdout).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let mut output = stdout_output.lock().await;
            output.push_str(&line);
            output.push('\n');
        }
    });

    let stderr_output = Arc::clone(&output);
    let stderr_handle = tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let mut output = stderr_output.lock().await;
            output.push_str(&line);
            output.push('\n');
        }
    });

    let status = child.wait().await;

    if let Err(e) = stdout_handle.await {
        warn!("failed to join stdout reader: {e}");
    }
    if let Err(e) = stderr_handle.await {
        warn!("failed to join stderr reader: {e}");
    }

    let captured = output.lock().await.clone();
    (status, captured)
}

/// The outcome of executing a [`RunSpec`].
/// 执行 [`RunSpec`] 的结果。
#[derive(Debug)]
pub struct Execution {
    pub status: ExitStatus,
    pub output: String,
}

/// Executes a run request and stores the captured output in its results file.
///
/// # Arguments
/// * `spec` - The run request built by the planner
/// * `default_cwd` - Working directory used when the run request has no override
///
/// 执行运行请求，并将捕获的输出保存到其结果文件中。
pub async fn execute(spec: &RunSpec, default_cwd: &Path) -> Result<Execution, AdapterError> {
    let (program, args) = spec.command.split_first().ok_or(AdapterError::EmptyCommand)?;

    let mut cmd = tokio::process::Command::new(program);
    cmd.args(args)
        .kill_on_drop(true)
        .current_dir(spec.cwd.as_deref().unwrap_or(default_cwd));

    let (status, output) = spawn_and_capture(cmd).await;
    let status = status?;

    tokio::fs::write(&spec.context.results_path, &output).await?;

    Ok(Execution { status, output })
}
