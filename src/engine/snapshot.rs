use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::history::{HistoryEntry, DEFAULT_CAPACITY};
use crate::metrics::MetricsSample;
use crate::operation::Locale;

/// スナップショットに含める履歴の件数
pub const SNAPSHOT_HISTORY: usize = 20;

/// 表示層向けの読み取り専用ビュー
#[derive(Debug, Clone, Serialize)]
pub struct EngineSnapshot {
    /// キャッシュされたパフォーマンススコア
    pub score: u8,
    /// 最新サンプルの健全性スコア (表示用、未計測なら None)
    pub health: Option<u8>,
    pub metrics: Option<MetricsSample>,
    /// 直近の履歴 (古い順)
    pub history: Vec<HistoryEntry>,
    pub history_len: usize,
    pub history_capacity: usize,
    pub applied: Vec<String>,
    pub applied_count: usize,
    pub in_flight: usize,
    pub sweep_pending: bool,
    pub locale: Locale,
    pub taken_at: DateTime<Utc>,
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            score: 0,
            health: None,
            metrics: None,
            history: Vec::new(),
            history_len: 0,
            history_capacity: DEFAULT_CAPACITY,
            applied: Vec::new(),
            applied_count: 0,
            in_flight: 0,
            sweep_pending: false,
            locale: Locale::default(),
            taken_at: Utc::now(),
        }
    }
}

/// ログの重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// 表示層への通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// 進行状況のログ (要求ごとに1回以上)
    Log {
        level: LogLevel,
        operation: String,
        message: String,
    },
    /// 要求の完了 (要求ごとにちょうど1回)
    Completed {
        operation: String,
        success: bool,
        excerpt: String,
    },
    /// フルスイープの完了
    SweepFinished { steps: usize },
}
