mod dispatcher;
mod pacing;
mod runner;
#[cfg(test)]
pub(crate) mod testing;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ExecutionError;

pub use dispatcher::{ExecutionDispatcher, DEFAULT_TIMEOUT};
pub use pacing::{FixedDelay, Pacer};
pub use runner::{CommandOutput, CommandRunner, ShellRunner};

/// 結果の抜粋の最大文字数
pub const EXCERPT_LIMIT: usize = 200;

/// 連続実行 (sequence) の識別子
pub type SequenceId = Uuid;

/// 1コマンドの実行要求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub id: Uuid,
    pub operation_id: String,
    /// 要求時点で解決した表示名
    pub operation_name: String,
    pub command: String,
    pub requested_at: DateTime<Utc>,
}

impl ExecutionRequest {
    pub fn new(
        operation_id: impl Into<String>,
        operation_name: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation_id: operation_id.into(),
            operation_name: operation_name.into(),
            command: command.into(),
            requested_at: Utc::now(),
        }
    }
}

/// 失敗の理由
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    Timeout,
    ExitStatus(Option<i32>),
    Launch(String),
}

impl FailureReason {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ExitStatus(_) => "exit_status",
            Self::Launch(_) => "launch",
        }
    }
}

impl From<&ExecutionError> for FailureReason {
    fn from(err: &ExecutionError) -> Self {
        match err {
            ExecutionError::Timeout(_) => Self::Timeout,
            ExecutionError::ExitStatus { code, .. } => Self::ExitStatus(*code),
            ExecutionError::Launch(msg) => Self::Launch(msg.clone()),
        }
    }
}

/// 1回の実行結果 (要求ごとにちょうど1つ)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub request_id: Uuid,
    pub operation_id: String,
    pub operation_name: String,
    pub command: String,
    pub success: bool,
    /// stdout (成功時) または stderr/エラー内容の抜粋
    pub excerpt: String,
    pub failure: Option<FailureReason>,
    pub completed_at: DateTime<Utc>,
    pub duration: Duration,
}

/// ディスパッチャからコーディネータへの通知
#[derive(Debug, Clone)]
pub enum DispatchEvent {
    /// 実行開始
    Started {
        request_id: Uuid,
        operation_id: String,
        operation_name: String,
    },
    /// 実行完了
    Finished(ExecutionResult),
    /// sequence の全ステップが完了
    SequenceFinished { sequence: SequenceId, steps: usize },
}
