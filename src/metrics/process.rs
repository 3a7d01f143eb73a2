use serde::Serialize;

/// 一覧に載せる最低使用率 (%)
pub const ACTIVITY_THRESHOLD: f32 = 0.1;
/// 高負荷とみなす使用率 (%)
const HIGH_LOAD: f32 = 50.0;
/// 中負荷とみなす使用率 (%)
const MEDIUM_LOAD: f32 = 20.0;

/// プロセスの負荷帯
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessLoad {
    High,
    Medium,
    Normal,
}

impl ProcessLoad {
    /// CPU と RAM の高い方で判定 (閾値ちょうどは下の帯)
    pub fn classify(cpu_percent: f32, ram_percent: f32) -> Self {
        if cpu_percent > HIGH_LOAD || ram_percent > HIGH_LOAD {
            Self::High
        } else if cpu_percent > MEDIUM_LOAD || ram_percent > MEDIUM_LOAD {
            Self::Medium
        } else {
            Self::Normal
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Normal => "NORMAL",
        }
    }
}

/// 1プロセスの使用状況
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub ram_percent: f32,
}

impl ProcessSample {
    pub fn load(&self) -> ProcessLoad {
        ProcessLoad::classify(self.cpu_percent, self.ram_percent)
    }

    /// CPU か RAM のどちらかが閾値を超えている
    pub fn is_active(&self) -> bool {
        self.cpu_percent > ACTIVITY_THRESHOLD || self.ram_percent > ACTIVITY_THRESHOLD
    }

    pub fn display_line(&self) -> String {
        format!(
            "PID: {} | {} | CPU: {:.1}% | RAM: {:.1}%",
            self.pid, self.name, self.cpu_percent, self.ram_percent
        )
    }
}

/// アクティブなプロセスを CPU 降順 (同率なら RAM 降順) で上位 `limit` 件
pub fn top_active(samples: Vec<ProcessSample>, limit: usize) -> Vec<ProcessSample> {
    let mut active: Vec<ProcessSample> = samples.into_iter().filter(ProcessSample::is_active).collect();
    active.sort_by(|a, b| {
        b.cpu_percent
            .total_cmp(&a.cpu_percent)
            .then(b.ram_percent.total_cmp(&a.ram_percent))
    });
    active.truncate(limit);
    active
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(pid: u32, cpu: f32, ram: f32) -> ProcessSample {
        ProcessSample {
            pid,
            name: format!("proc-{pid}"),
            cpu_percent: cpu,
            ram_percent: ram,
        }
    }

    #[test]
    fn test_load_bands() {
        assert_eq!(ProcessLoad::classify(75.0, 1.0), ProcessLoad::High);
        assert_eq!(ProcessLoad::classify(1.0, 60.0), ProcessLoad::High);
        assert_eq!(ProcessLoad::classify(30.0, 5.0), ProcessLoad::Medium);
        assert_eq!(ProcessLoad::classify(0.0, 21.0), ProcessLoad::Medium);
        assert_eq!(ProcessLoad::classify(10.0, 10.0), ProcessLoad::Normal);
    }

    #[test]
    fn test_band_thresholds_are_exclusive() {
        assert_eq!(ProcessLoad::classify(50.0, 0.0), ProcessLoad::Medium);
        assert_eq!(ProcessLoad::classify(20.0, 20.0), ProcessLoad::Normal);
    }

    #[test]
    fn test_idle_processes_are_dropped() {
        let picked = top_active(
            vec![sample(1, 0.0, 0.05), sample(2, 0.1, 0.1), sample(3, 0.0, 0.2)],
            10,
        );

        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].pid, 3);
    }

    #[test]
    fn test_sorted_by_cpu_and_limited() {
        let picked = top_active(
            vec![
                sample(1, 5.0, 1.0),
                sample(2, 80.0, 1.0),
                sample(3, 5.0, 9.0),
                sample(4, 30.0, 1.0),
            ],
            3,
        );

        let pids: Vec<u32> = picked.iter().map(|p| p.pid).collect();
        assert_eq!(pids, [2, 4, 3]);
        assert_eq!(picked[0].load(), ProcessLoad::High);
        assert_eq!(picked[1].load(), ProcessLoad::Medium);
    }

    #[test]
    fn test_display_line() {
        assert_eq!(
            sample(42, 12.34, 5.0).display_line(),
            "PID: 42 | proc-42 | CPU: 12.3% | RAM: 5.0%"
        );
    }
}
