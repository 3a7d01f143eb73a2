use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use super::snapshot::EngineSnapshot;
use crate::config::Settings;
use crate::metrics::SystemInfo;

/// レポート・統計の見出しに使うアプリ名
pub const APP_NAME: &str = "BOOSTER";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// レポートに載せる履歴の件数
const REPORT_HISTORY: usize = 10;

const FIXED_TIPS: [&str; 4] = [
    "Clean logs once a week",
    "Run the registry optimization once a month",
    "Keep GPU drivers up to date",
    "Defragment disks once a month",
];

/// おすすめ一覧 (健全性が閾値未満ならフルスイープを先頭に追加)
pub fn recommendations(snapshot: &EngineSnapshot, settings: &Settings) -> Vec<String> {
    let mut tips = Vec::with_capacity(FIXED_TIPS.len() + 1);
    if let Some(health) = snapshot.health {
        let threshold = settings.auto_boost_threshold();
        if health < threshold {
            tips.push(format!(
                "System health is {health}/100 (below {threshold}): run the full sweep"
            ));
        }
    }
    tips.extend(FIXED_TIPS.iter().map(|t| t.to_string()));
    tips
}

/// 統計の要約 (ポップアップと CLI の `score` で共用)
pub fn statistics_text(snapshot: &EngineSnapshot) -> String {
    let applied = if snapshot.applied.is_empty() {
        "None yet".to_string()
    } else {
        snapshot.applied.join(", ")
    };

    let mut out = String::new();
    let _ = writeln!(out, "{APP_NAME} STATISTICS");
    let _ = writeln!(out, "=================");
    let _ = writeln!(out, "* Applied operations: {}", snapshot.applied_count);
    let _ = writeln!(out, "* Performance score: {}/100", snapshot.score);
    let _ = writeln!(out, "* Running requests: {}", snapshot.in_flight);
    let _ = writeln!(out, "* System health: {}", percent_or_na(snapshot.health.map(f32::from), "/100"));
    let _ = writeln!(
        out,
        "* History entries: {}/{}",
        snapshot.history_len, snapshot.history_capacity
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "APPLIED OPTIMIZATIONS:");
    let _ = writeln!(out, "{applied}");
    out
}

/// レポート本文を生成
///
/// `system` が None ならシステム情報のブロックを省く。
pub fn render_report(
    snapshot: &EngineSnapshot,
    settings: &Settings,
    system: Option<&SystemInfo>,
    now: DateTime<Local>,
) -> String {
    let metrics = snapshot.metrics.unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(out, "{APP_NAME} PERFORMANCE REPORT");
    let _ = writeln!(out, "============================");
    let _ = writeln!(out, "Date: {}", now.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Version: {APP_VERSION}");
    let _ = writeln!(out, "Language: {}", snapshot.locale.code());
    let _ = writeln!(out);

    if let Some(system) = system {
        write_system_info(&mut out, system);
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "PERFORMANCE METRICS:");
    let _ = writeln!(out, "* CPU usage: {}", percent_or_na(metrics.cpu_percent, "%"));
    let _ = writeln!(out, "* RAM usage: {}", percent_or_na(metrics.ram_percent, "%"));
    let _ = writeln!(out, "* Disk usage: {}", percent_or_na(metrics.disk_percent, "%"));
    let _ = writeln!(out, "* Network sent: {}", bytes_or_na(metrics.net_bytes_sent));
    let _ = writeln!(out, "* Network received: {}", bytes_or_na(metrics.net_bytes_recv));
    let _ = writeln!(out, "* Performance score: {}/100", snapshot.score);
    let _ = writeln!(out, "* System health: {}", percent_or_na(snapshot.health.map(f32::from), "/100"));
    let _ = writeln!(out);

    out.push_str(&statistics_text(snapshot));
    let _ = writeln!(out);

    let _ = writeln!(out, "OPERATION HISTORY:");
    let skip = snapshot.history.len().saturating_sub(REPORT_HISTORY);
    if snapshot.history.is_empty() {
        let _ = writeln!(out, "(empty)");
    }
    for entry in snapshot.history.iter().skip(skip) {
        let _ = writeln!(out, "{}", entry.summary_line());
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "RECOMMENDATIONS:");
    for (i, tip) in recommendations(snapshot, settings).iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, tip);
    }
    out
}

fn write_system_info(out: &mut String, system: &SystemInfo) {
    let cores = system
        .cpu_cores
        .map_or_else(|| "N/A".to_string(), |c| c.to_string());
    let frequency = system
        .cpu_frequency_mhz
        .map_or_else(|| "N/A".to_string(), |f| format!("{f} MHz"));

    let _ = writeln!(out, "SYSTEM INFORMATION:");
    let _ = writeln!(out, "* Platform: {}", system.platform);
    let _ = writeln!(out, "* CPU: {cores} cores / {} threads", system.cpu_threads);
    let _ = writeln!(out, "* CPU frequency: {frequency}");
    let _ = writeln!(out, "* RAM total: {}", gigabytes(system.ram_total));
    let _ = writeln!(out, "* RAM available: {}", gigabytes(system.ram_available));
    let _ = writeln!(out, "* RAM used: {}", gigabytes(system.ram_used));
    match &system.disk {
        Some(disk) => {
            let _ = writeln!(out, "* Disk total: {}", gigabytes(disk.total));
            let _ = writeln!(out, "* Disk used: {}", gigabytes(disk.used));
            let _ = writeln!(out, "* Disk free: {}", gigabytes(disk.free));
        }
        None => {
            let _ = writeln!(out, "* Disk: N/A");
        }
    }
}

/// `<data_dir>/reports/Performance_Report_<YYYYmmdd_HHMMSS>.txt` に書き出す
pub fn write_report(
    data_dir: &Path,
    snapshot: &EngineSnapshot,
    settings: &Settings,
    system: Option<&SystemInfo>,
) -> Result<PathBuf> {
    let dir = data_dir.join("reports");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;

    let now = Local::now();
    let path = dir.join(format!(
        "Performance_Report_{}.txt",
        now.format("%Y%m%d_%H%M%S")
    ));
    let content = render_report(snapshot, settings, system, now);
    fs::write(&path, content)
        .with_context(|| format!("Failed to write report {}", path.display()))?;

    tracing::info!(path = %path.display(), "Report saved");
    Ok(path)
}

fn percent_or_na(value: Option<f32>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.0}{unit}"),
        None => "N/A".to_string(),
    }
}

fn gigabytes(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / 1_073_741_824.0)
}

fn bytes_or_na(value: Option<u64>) -> String {
    match value {
        Some(v) => format!("{:.1} MB", v as f64 / 1_048_576.0),
        None => "N/A".to_string(),
    }
}
