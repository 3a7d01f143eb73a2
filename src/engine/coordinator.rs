use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use tokio::sync::{mpsc, watch};

use super::report;
use super::scoring::Scoreboard;
use super::snapshot::{EngineSnapshot, LogLevel, Notification, SNAPSHOT_HISTORY};
use crate::dispatch::{
    CommandRunner, DispatchEvent, ExecutionDispatcher, ExecutionRequest, ExecutionResult,
    FailureReason, Pacer, SequenceId,
};
use crate::error::EngineError;
use crate::history::{Details, HistoryEntry, HistoryLog, DEFAULT_CAPACITY};
use crate::metrics::{score, MetricsProvider, MetricsSample};
use crate::operation::{Locale, Operation, OperationRegistry};

/// ディスパッチイベントのチャンネル容量
const EVENT_BUFFER: usize = 100;

/// オーケストレーションエンジン
///
/// 履歴・適用済みセット・スコアを唯一変更するコーディネータ。
/// 実行はすべて `ExecutionDispatcher` のタスクで行い、結果はチャンネル経由で受け取る。
pub struct Engine {
    registry: Arc<OperationRegistry>,
    dispatcher: ExecutionDispatcher,
    /// ディスパッチ結果の受信側
    events: mpsc::Receiver<DispatchEvent>,
    /// 表示層への通知
    notifications: mpsc::UnboundedSender<Notification>,
    snapshots: watch::Sender<EngineSnapshot>,
    history: HistoryLog,
    scoreboard: Scoreboard,
    /// 最新サンプルの健全性スコア (表示用、キャッシュされたスコアは scoreboard 側)
    health: Option<u8>,
    metrics: Option<MetricsSample>,
    locale: Locale,
    /// 完了待ちの要求数
    in_flight: usize,
    /// 実行中のフルスイープ
    pending_sweep: Option<SequenceId>,
}

impl Engine {
    pub fn new(
        registry: Arc<OperationRegistry>,
        runner: Arc<dyn CommandRunner>,
        pacer: Arc<dyn Pacer>,
        notifications: mpsc::UnboundedSender<Notification>,
    ) -> Self {
        let (event_tx, events) = mpsc::channel(EVENT_BUFFER);
        let dispatcher = ExecutionDispatcher::new(runner, pacer, event_tx);
        let (snapshots, _) = watch::channel(EngineSnapshot::default());

        Self {
            registry,
            dispatcher,
            events,
            notifications,
            snapshots,
            history: HistoryLog::new(DEFAULT_CAPACITY),
            scoreboard: Scoreboard::default(),
            health: None,
            metrics: None,
            locale: Locale::default(),
            in_flight: 0,
            pending_sweep: None,
        }
    }

    /// コマンドごとのタイムアウトを変更
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.dispatcher = self.dispatcher.clone().with_timeout(timeout);
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        self.publish();
    }

    /// オペレーションを実行
    ///
    /// コマンドが複数ある場合は間隔を空けて順に実行する。戻り値はディスパッチした要求数。
    pub fn request_run(&mut self, operation_id: &str) -> Result<usize, EngineError> {
        let operation = self
            .registry
            .get(operation_id)
            .ok_or_else(|| EngineError::UnknownOperation(operation_id.to_string()))?;
        let label = operation.label(self.locale).to_string();
        let mut requests = self.build_requests(operation);
        let count = requests.len();

        self.in_flight += count;
        if count == 1 {
            if let Some(request) = requests.pop() {
                self.dispatcher.dispatch(request);
            }
        } else {
            self.dispatcher.run_sequence(requests);
        }

        tracing::info!(operation = %operation_id, commands = count, "Operation requested");
        self.notify(Notification::Log {
            level: LogLevel::Info,
            operation: label,
            message: format!("Queued {count} command(s)"),
        });
        self.publish();
        Ok(count)
    }

    /// 複数のオペレーションを実行
    ///
    /// 先にすべての ID を確認し、1つでも不明なら何も実行しない。戻り値は要求数の合計。
    pub fn request_runs(&mut self, operation_ids: &[String]) -> Result<usize, EngineError> {
        if let Some(unknown) = operation_ids
            .iter()
            .find(|id| self.registry.get(id).is_none())
        {
            return Err(EngineError::UnknownOperation(unknown.clone()));
        }

        let mut total = 0;
        for id in operation_ids {
            total += self.request_run(id)?;
        }
        Ok(total)
    }

    /// 登録済みの全オペレーションを順に実行 (フルスイープ)
    ///
    /// 全ステップ完了後にキャッシュされたスコアを 100 にする。
    pub fn request_run_all(&mut self) -> Result<SequenceId, EngineError> {
        if self.pending_sweep.is_some() {
            return Err(EngineError::SweepInProgress);
        }

        let requests: Vec<ExecutionRequest> = self
            .registry
            .iter()
            .flat_map(|operation| self.build_requests(operation))
            .collect();
        let count = requests.len();

        self.in_flight += count;
        let (sequence, _) = self.dispatcher.run_sequence(requests);
        self.pending_sweep = Some(sequence);

        tracing::info!(%sequence, commands = count, "Full sweep requested");
        self.notify(Notification::Log {
            level: LogLevel::Info,
            operation: "MEGA BOOST".into(),
            message: format!("Sweep started ({count} commands)"),
        });
        self.publish();
        Ok(sequence)
    }

    fn build_requests(&self, operation: &Operation) -> Vec<ExecutionRequest> {
        let label = operation.label(self.locale);
        let commands = operation.commands();
        let total = commands.len();

        commands
            .iter()
            .enumerate()
            .map(|(i, command)| {
                let name = if total > 1 {
                    format!("{} ({}/{})", label, i + 1, total)
                } else {
                    label.to_string()
                };
                ExecutionRequest::new(&operation.id, name, command)
            })
            .collect()
    }

    /// 受信済みイベントをすべて処理 (ブロックしない)
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// 次のイベントを待って処理
    ///
    /// ディスパッチャが送信側を保持しているため、待ち状態がないときに呼ぶと戻らない。
    /// 先に `is_idle` を確認すること。
    pub async fn next_event(&mut self) -> bool {
        match self.events.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// 完了待ちの要求もスイープもない
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0 && self.pending_sweep.is_none()
    }

    pub fn handle_event(&mut self, event: DispatchEvent) {
        match event {
            DispatchEvent::Started { operation_name, .. } => {
                self.notify(Notification::Log {
                    level: LogLevel::Info,
                    operation: operation_name,
                    message: "Starting...".into(),
                });
            }
            DispatchEvent::Finished(result) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.record_result(result);
            }
            DispatchEvent::SequenceFinished { sequence, steps } => {
                if self.pending_sweep == Some(sequence) {
                    self.pending_sweep = None;
                    self.scoreboard.complete_sweep();
                    tracing::info!(%sequence, steps, "Full sweep finished");
                    self.notify(Notification::SweepFinished { steps });
                } else {
                    tracing::debug!(%sequence, steps, "Sequence finished");
                }
            }
        }
        self.publish();
    }

    fn record_result(&mut self, result: ExecutionResult) -> HistoryEntry {
        let mut details = Details::new();
        details.insert("operation_id".into(), json!(result.operation_id));
        details.insert("request_id".into(), json!(result.request_id.to_string()));
        details.insert("duration_ms".into(), json!(result.duration.as_millis() as u64));
        if let Some(failure) = &result.failure {
            details.insert("failure".into(), json!(failure.kind()));
            match failure {
                FailureReason::Timeout => {
                    details.insert("timeout".into(), json!(true));
                }
                FailureReason::ExitStatus(code) => {
                    details.insert("exit_code".into(), json!(code));
                }
                FailureReason::Launch(_) => {}
            }
        }

        let entry = self.history.append(
            &result.operation_name,
            &result.command,
            result.success,
            &result.excerpt,
            details,
        );

        if result.success && self.scoreboard.record_success(&result.operation_id) {
            tracing::info!(
                operation = %result.operation_id,
                score = self.scoreboard.score(),
                "Operation applied for the first time",
            );
        }

        let (level, message) = match (&result.failure, result.success) {
            (_, true) => (LogLevel::Success, "Completed".to_string()),
            (Some(FailureReason::Timeout), _) => (LogLevel::Error, "Timed out".to_string()),
            _ => (
                LogLevel::Error,
                format!("Failed: {}", crate::history::truncate_chars(&result.excerpt, 100)),
            ),
        };
        self.notify(Notification::Log {
            level,
            operation: result.operation_name.clone(),
            message,
        });
        self.notify(Notification::Completed {
            operation: result.operation_name,
            success: result.success,
            excerpt: result.excerpt,
        });

        entry
    }

    /// メトリクスを取得してスコアを再計算
    ///
    /// キャッシュされたスコアは計測値で置き換わる。取得できなければ 0。
    pub fn refresh_metrics(&mut self, provider: &dyn MetricsProvider) -> u8 {
        let sample = provider.sample();
        let health = score::compute(sample.as_ref());

        match sample {
            Ok(sample) => self.metrics = Some(sample),
            Err(e) => {
                tracing::warn!(error = %e, "Metrics sampling failed");
                // 取得できなくなった時点で1回だけ通知
                if self.metrics.is_some() || self.health.is_none() {
                    self.notify(Notification::Log {
                        level: LogLevel::Warning,
                        operation: "MONITOR".into(),
                        message: e.to_string(),
                    });
                }
                self.metrics = None;
            }
        }
        self.health = Some(health);
        self.scoreboard.set_measured(health);
        self.publish();
        health
    }

    pub fn clear_history(&mut self) {
        if self.history.is_empty() {
            return;
        }
        self.history.clear();
        self.publish();
    }

    pub fn is_applied(&self, operation_id: &str) -> bool {
        self.scoreboard.is_applied(operation_id)
    }

    /// 現時点のスナップショット (実行中の要求を待たない)
    pub fn snapshot(&self) -> EngineSnapshot {
        let applied: Vec<String> = self.scoreboard.applied().iter().cloned().collect();
        EngineSnapshot {
            score: self.scoreboard.score(),
            health: self.health,
            metrics: self.metrics,
            history: self.history.tail(SNAPSHOT_HISTORY),
            history_len: self.history.len(),
            history_capacity: self.history.capacity(),
            applied_count: applied.len(),
            applied,
            in_flight: self.in_flight,
            sweep_pending: self.pending_sweep.is_some(),
            locale: self.locale,
            taken_at: Utc::now(),
        }
    }

    /// 統計の要約テキスト
    pub fn statistics(&self) -> String {
        report::statistics_text(&self.snapshot())
    }

    /// 状態が変わるたびに新しいスナップショットを受け取る (表示層はこれを読む)
    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.snapshots.subscribe()
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }

    fn notify(&self, notification: Notification) {
        if self.notifications.send(notification).is_err() {
            tracing::debug!("Notification receiver dropped");
        }
    }
}
