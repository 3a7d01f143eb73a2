use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// 設定ファイルの読み書きエラー (呼び出し側で回復する)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 外部コマンドの実行エラー
///
/// エンジンの外には出さず、失敗した `ExecutionResult` に変換される。
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Command timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("Command exited with status {code:?}")]
    ExitStatus { code: Option<i32>, stderr: String },
    #[error("Failed to launch command: {0}")]
    Launch(String),
}

/// メトリクスが取得できない
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Metrics unavailable: {0}")]
pub struct MetricsUnavailable(pub String);

/// エンジンへの要求エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    #[error("A full sweep is already running")]
    SweepInProgress,
}
