use std::sync::{Mutex, PoisonError};

use sysinfo::{Disk, Disks, Networks, System};

use super::process::{self, ProcessSample};
use super::{DiskSpace, MetricsProvider, MetricsSample, SystemInfo};
use crate::error::MetricsUnavailable;

/// sysinfo によるメトリクス取得
///
/// CPU 使用率は前回の refresh との差分で計算されるため、最初のサンプルは 0 に近くなる。
pub struct SystemMetrics {
    sys: Mutex<System>,
}

impl SystemMetrics {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();
        sys.refresh_memory();
        Self {
            sys: Mutex::new(sys),
        }
    }

    /// 使用率の高いプロセス (上位 `limit` 件)
    pub fn top_processes(&self, limit: usize) -> Vec<ProcessSample> {
        let mut sys = self.sys.lock().unwrap_or_else(PoisonError::into_inner);
        sys.refresh_memory();
        sys.refresh_processes();

        let total = sys.total_memory();
        let samples = sys
            .processes()
            .values()
            .map(|p| ProcessSample {
                pid: p.pid().as_u32(),
                name: p.name().to_string(),
                cpu_percent: p.cpu_usage(),
                ram_percent: percent(p.memory(), total).unwrap_or(0.0),
            })
            .collect();
        process::top_active(samples, limit)
    }

    /// レポート用のシステム情報
    pub fn system_info(&self) -> SystemInfo {
        let mut sys = self.sys.lock().unwrap_or_else(PoisonError::into_inner);
        sys.refresh_cpu();
        sys.refresh_memory();

        let disks = Disks::new_with_refreshed_list();
        let disk = root_disk(&disks).map(|d| DiskSpace {
            total: d.total_space(),
            used: d.total_space().saturating_sub(d.available_space()),
            free: d.available_space(),
        });

        SystemInfo {
            platform: System::long_os_version().unwrap_or_else(|| std::env::consts::OS.to_string()),
            cpu_cores: sys.physical_core_count(),
            cpu_threads: sys.cpus().len(),
            cpu_frequency_mhz: sys.cpus().first().map(|c| c.frequency()),
            ram_total: sys.total_memory(),
            ram_available: sys.available_memory(),
            ram_used: sys.used_memory(),
            disk,
        }
    }
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsProvider for SystemMetrics {
    fn sample(&self) -> Result<MetricsSample, MetricsUnavailable> {
        let mut sys = self.sys.lock().unwrap_or_else(PoisonError::into_inner);
        sys.refresh_cpu();
        sys.refresh_memory();

        if sys.cpus().is_empty() && sys.total_memory() == 0 {
            return Err(MetricsUnavailable("no CPU or memory information".into()));
        }

        let cpu_percent = (!sys.cpus().is_empty()).then(|| sys.global_cpu_info().cpu_usage());
        let ram_percent = percent(sys.used_memory(), sys.total_memory());

        let disks = Disks::new_with_refreshed_list();
        let disk_percent = root_disk(&disks).and_then(|d| {
            percent(d.total_space().saturating_sub(d.available_space()), d.total_space())
        });

        // 全インターフェースの合計
        let networks = Networks::new_with_refreshed_list();
        let (net_bytes_sent, net_bytes_recv) = if networks.list().is_empty() {
            (None, None)
        } else {
            let (mut sent, mut recv) = (0u64, 0u64);
            for (_name, data) in networks.list() {
                sent += data.total_transmitted();
                recv += data.total_received();
            }
            (Some(sent), Some(recv))
        };

        Ok(MetricsSample {
            cpu_percent,
            ram_percent,
            disk_percent,
            net_bytes_sent,
            net_bytes_recv,
        })
    }
}

/// ルート (なければ最初の) ディスク
fn root_disk(disks: &Disks) -> Option<&Disk> {
    disks
        .list()
        .iter()
        .find(|d| d.mount_point() == std::path::Path::new("/"))
        .or_else(|| disks.list().first())
}

fn percent(used: u64, total: u64) -> Option<f32> {
    (total > 0).then(|| (used as f64 / total as f64 * 100.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(50, 200), Some(25.0));
        assert_eq!(percent(10, 0), None);
    }

    #[test]
    fn test_sample_values_are_percentages() {
        let metrics = SystemMetrics::new();
        if let Ok(sample) = metrics.sample() {
            for value in [sample.cpu_percent, sample.ram_percent, sample.disk_percent]
                .into_iter()
                .flatten()
            {
                assert!((0.0..=100.5).contains(&value), "out of range: {value}");
            }
        }
    }

    #[test]
    fn test_top_processes_respects_limit() {
        let metrics = SystemMetrics::new();
        let top = metrics.top_processes(3);

        assert!(top.len() <= 3);
        assert!(top.iter().all(ProcessSample::is_active));
    }

    #[test]
    fn test_system_info_is_consistent() {
        let info = SystemMetrics::new().system_info();

        assert!(!info.platform.is_empty());
        assert!(info.ram_used <= info.ram_total);
        if let Some(disk) = info.disk {
            assert!(disk.used <= disk.total);
        }
    }
}
