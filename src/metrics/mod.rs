mod process;
pub mod score;
mod system;

use serde::{Deserialize, Serialize};

use crate::error::MetricsUnavailable;

pub use process::{ProcessLoad, ProcessSample};
pub use system::SystemMetrics;

/// ある時点のシステムメトリクス
///
/// 取得できなかった値は `None`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSample {
    pub cpu_percent: Option<f32>,
    pub ram_percent: Option<f32>,
    pub disk_percent: Option<f32>,
    pub net_bytes_sent: Option<u64>,
    pub net_bytes_recv: Option<u64>,
}

/// メトリクスの取得元
pub trait MetricsProvider: Send + Sync {
    /// 現在値を取得 (ソース自体が使えない場合は `MetricsUnavailable`)
    fn sample(&self) -> Result<MetricsSample, MetricsUnavailable>;
}

/// ディスク容量 (バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiskSpace {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

/// レポートに載せるシステム情報 (容量はバイト)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemInfo {
    pub platform: String,
    /// 物理コア数
    pub cpu_cores: Option<usize>,
    /// 論理スレッド数
    pub cpu_threads: usize,
    pub cpu_frequency_mhz: Option<u64>,
    pub ram_total: u64,
    pub ram_available: u64,
    pub ram_used: u64,
    pub disk: Option<DiskSpace>,
}
