use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

use super::{
    CommandOutput, CommandRunner, DispatchEvent, ExecutionRequest, ExecutionResult, FailureReason,
    Pacer, SequenceId, EXCERPT_LIMIT,
};
use crate::error::ExecutionError;
use crate::history::truncate_chars;

/// 1コマンドあたりのタイムアウト
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// コマンドをバックグラウンドで実行し、結果をチャンネルで通知する
///
/// 各要求は独立した tokio タスクで実行され、共有状態には触れない。
/// 開始した要求は必ず1回だけ `DispatchEvent::Finished` を送る。
#[derive(Clone)]
pub struct ExecutionDispatcher {
    runner: Arc<dyn CommandRunner>,
    pacer: Arc<dyn Pacer>,
    events: mpsc::Sender<DispatchEvent>,
    timeout: Duration,
}

impl ExecutionDispatcher {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        pacer: Arc<dyn Pacer>,
        events: mpsc::Sender<DispatchEvent>,
    ) -> Self {
        Self {
            runner,
            pacer,
            events,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 要求をバックグラウンドで実行
    pub fn dispatch(&self, request: ExecutionRequest) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.execute(request).await })
    }

    /// 要求を宣言順に、間隔を空けて実行
    ///
    /// 途中の失敗で中断しない。全ステップの完了後に `SequenceFinished` を送る。
    pub fn run_sequence(&self, requests: Vec<ExecutionRequest>) -> (SequenceId, JoinHandle<usize>) {
        let sequence = Uuid::new_v4();
        let this = self.clone();

        let handle = tokio::spawn(async move {
            let steps = requests.len();
            tracing::info!(%sequence, steps, "Sequence started");

            let mut handles = Vec::with_capacity(steps);
            for (i, request) in requests.into_iter().enumerate() {
                if i > 0 {
                    this.pacer.pause().await;
                }
                handles.push(this.dispatch(request));
            }

            for handle in handles {
                if let Err(e) = handle.await {
                    tracing::error!(%sequence, error = %e, "Dispatch task failed");
                }
            }

            tracing::info!(%sequence, steps, "Sequence finished");
            this.emit(DispatchEvent::SequenceFinished { sequence, steps })
                .await;
            steps
        });

        (sequence, handle)
    }

    async fn execute(&self, request: ExecutionRequest) {
        tracing::debug!(
            request_id = %request.id,
            operation = %request.operation_id,
            command = %request.command,
            "Dispatching command",
        );
        self.emit(DispatchEvent::Started {
            request_id: request.id,
            operation_id: request.operation_id.clone(),
            operation_name: request.operation_name.clone(),
        })
        .await;

        let started = Instant::now();
        let outcome = self.run_with_timeout(&request.command).await;
        let result = into_result(request, outcome, started.elapsed());

        self.emit(DispatchEvent::Finished(result)).await;
    }

    async fn run_with_timeout(&self, command: &str) -> Result<CommandOutput, ExecutionError> {
        let runner = Arc::clone(&self.runner);
        let command = command.to_string();
        let limit = self.timeout;

        // runner が panic しても失敗結果として返すため別タスクで実行
        let task =
            tokio::spawn(async move { tokio::time::timeout(limit, runner.run(&command)).await });

        match task.await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_elapsed)) => Err(ExecutionError::Timeout(limit)),
            Err(e) => Err(ExecutionError::Launch(format!("runner crashed: {e}"))),
        }
    }

    async fn emit(&self, event: DispatchEvent) {
        if self.events.send(event).await.is_err() {
            tracing::debug!("Dispatch event receiver dropped");
        }
    }
}

fn into_result(
    request: ExecutionRequest,
    outcome: Result<CommandOutput, ExecutionError>,
    duration: Duration,
) -> ExecutionResult {
    let outcome = outcome.and_then(|output| {
        if output.success() {
            Ok(output)
        } else {
            let stderr = if output.stderr.trim().is_empty() {
                output.stdout
            } else {
                output.stderr
            };
            Err(ExecutionError::ExitStatus {
                code: output.code,
                stderr,
            })
        }
    });

    let (success, excerpt, failure) = match outcome {
        Ok(output) => (true, output.stdout.trim().to_string(), None),
        Err(err) => {
            let excerpt = match &err {
                ExecutionError::ExitStatus { stderr, .. } if !stderr.trim().is_empty() => {
                    stderr.trim().to_string()
                }
                _ => err.to_string(),
            };
            (false, excerpt, Some(FailureReason::from(&err)))
        }
    };

    ExecutionResult {
        request_id: request.id,
        operation_id: request.operation_id,
        operation_name: request.operation_name,
        command: request.command,
        success,
        excerpt: truncate_chars(&excerpt, EXCERPT_LIMIT),
        failure,
        completed_at: Utc::now(),
        duration,
    }
}
