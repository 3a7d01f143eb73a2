use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::ExecutionError;

/// コマンドの終了状態と出力
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// 終了コード (シグナルで終了した場合は None)
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// コマンド文字列の実行方法
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// 完了まで待つ。タイムアウトは呼び出し側で扱う
    async fn run(&self, command: &str) -> Result<CommandOutput, ExecutionError>;
}

/// OS のシェル経由で実行
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    flag: String,
}

impl Default for ShellRunner {
    fn default() -> Self {
        if cfg!(windows) {
            Self::new("cmd", "/C")
        } else {
            Self::new("sh", "-c")
        }
    }
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            flag: flag.into(),
        }
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput, ExecutionError> {
        // タイムアウトで future が drop されたら子プロセスも kill する
        let child = Command::new(&self.shell)
            .arg(&self.flag)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExecutionError::Launch(format!("{}: {}", self.shell, e)))?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ExecutionError::Launch(e.to_string()))?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shell_runner_captures_stdout() {
        let output = ShellRunner::default().run("echo hello").await.unwrap();

        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_shell_runner_reports_exit_code() {
        let output = ShellRunner::default()
            .run("echo broken >&2; exit 3")
            .await
            .unwrap();

        assert!(!output.success());
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stderr.trim(), "broken");
    }

    #[tokio::test]
    async fn test_missing_shell_is_launch_error() {
        let runner = ShellRunner::new("/nonexistent/shell", "-c");
        let result = runner.run("true").await;

        assert!(matches!(result, Err(ExecutionError::Launch(_))));
    }
}
