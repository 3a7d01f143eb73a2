use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// デフォルトの保持件数
pub const DEFAULT_CAPACITY: usize = 50;
/// 記録するコマンド文字列の最大文字数
const COMMAND_LIMIT: usize = 100;
/// 記録する結果文字列の最大文字数
const RESULT_LIMIT: usize = 200;

/// 任意の付加情報
pub type Details = BTreeMap<String, serde_json::Value>;

/// 実行履歴の1件 (作成後は不変)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 単調増加するID
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    /// オペレーション名
    pub operation: String,
    /// 実行したコマンド (切り詰め済み)
    pub command: String,
    pub success: bool,
    /// 出力の抜粋 (切り詰め済み)
    pub result: String,
    #[serde(default)]
    pub details: Details,
}

impl HistoryEntry {
    /// タイムアウトで失敗したか
    pub fn is_timeout(&self) -> bool {
        self.details
            .get("timeout")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }

    /// 一覧表示用の1行
    pub fn summary_line(&self) -> String {
        format!(
            "{} - {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            if self.success { "✅" } else { "❌" }
        )
    }
}

/// 件数上限つきの実行履歴 (古いものから捨てる)
#[derive(Debug)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    next_id: u64,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// 履歴を追加
    pub fn append(
        &mut self,
        operation: &str,
        command: &str,
        success: bool,
        result: &str,
        details: Details,
    ) -> HistoryEntry {
        let entry = HistoryEntry {
            id: self.next_id,
            timestamp: Utc::now(),
            operation: operation.to_string(),
            command: truncate_chars(command, COMMAND_LIMIT),
            success,
            result: truncate_chars(result, RESULT_LIMIT),
            details,
        };
        self.next_id += 1;

        self.entries.push_back(entry.clone());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }

        if success {
            tracing::info!(id = entry.id, operation = %entry.operation, "Operation succeeded");
        } else {
            tracing::warn!(
                id = entry.id,
                operation = %entry.operation,
                result = %entry.result,
                "Operation failed",
            );
        }

        entry
    }

    /// 直近 n 件 (古い順)
    pub fn tail(&self, n: usize) -> Vec<HistoryEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// 全件削除 (IDは引き続き増える)
    pub fn clear(&mut self) {
        self.entries.clear();
        tracing::info!("History cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// 文字数で切り詰める
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
