use super::MetricsSample;
use crate::error::MetricsUnavailable;

/// メトリクスが取得できない場合のスコア
pub const UNAVAILABLE_SCORE: u8 = 0;

/// (閾値, 減点) の帯。高い順に並べ、閾値を超えた最初の帯だけ適用する
const CPU_BANDS: [(f32, i32); 2] = [(80.0, 30), (60.0, 15)];
const RAM_BANDS: [(f32, i32); 2] = [(85.0, 30), (70.0, 15)];
const DISK_BANDS: [(f32, i32); 2] = [(90.0, 20), (80.0, 10)];

/// 健全性スコアを計算 (取得不可なら 0)
pub fn compute(sample: Result<&MetricsSample, &MetricsUnavailable>) -> u8 {
    match sample {
        Ok(sample) => compute_sample(sample),
        Err(_) => UNAVAILABLE_SCORE,
    }
}

/// 100 から各リソースの減点を引き、最後に 0..=100 に収める
pub fn compute_sample(sample: &MetricsSample) -> u8 {
    let score = 100
        - penalty(sample.cpu_percent, &CPU_BANDS)
        - penalty(sample.ram_percent, &RAM_BANDS)
        - penalty(sample.disk_percent, &DISK_BANDS);
    score.clamp(0, 100) as u8
}

fn penalty(value: Option<f32>, bands: &[(f32, i32)]) -> i32 {
    let Some(value) = value else {
        return 0;
    };
    bands
        .iter()
        .find(|(threshold, _)| value > *threshold)
        .map_or(0, |(_, penalty)| *penalty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(cpu: f32, ram: f32, disk: Option<f32>) -> MetricsSample {
        MetricsSample {
            cpu_percent: Some(cpu),
            ram_percent: Some(ram),
            disk_percent: disk,
            ..Default::default()
        }
    }

    #[test]
    fn test_high_cpu_only() {
        assert_eq!(compute_sample(&sample(85.0, 50.0, Some(50.0))), 70);
    }

    #[test]
    fn test_mixed_bands() {
        assert_eq!(compute_sample(&sample(65.0, 75.0, Some(95.0))), 50);
    }

    #[test]
    fn test_unavailable_source_is_zero() {
        let err = MetricsUnavailable("no backend".into());
        assert_eq!(compute(Err(&err)), 0);
    }

    #[test]
    fn test_healthy_system_is_100() {
        assert_eq!(compute_sample(&sample(10.0, 20.0, Some(30.0))), 100);
        assert_eq!(compute_sample(&MetricsSample::default()), 100);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        // ちょうど閾値の値は下のバンド扱い
        assert_eq!(compute_sample(&sample(80.0, 85.0, Some(90.0))), 100 - 15 - 15 - 10);
        assert_eq!(compute_sample(&sample(60.0, 70.0, Some(80.0))), 100);
    }

    #[test]
    fn test_missing_disk_has_no_penalty() {
        assert_eq!(compute_sample(&sample(90.0, 90.0, None)), 40);
    }

    #[test]
    fn test_worst_case_stays_in_range() {
        assert_eq!(compute_sample(&sample(100.0, 100.0, Some(100.0))), 20);
    }

    #[test]
    fn test_compute_is_deterministic_and_bounded() {
        let values = [0.0, 30.0, 60.0, 60.5, 70.5, 80.0, 80.5, 85.5, 90.5, 100.0];
        for cpu in values {
            for ram in values {
                for disk in values {
                    let s = sample(cpu, ram, Some(disk));
                    let first = compute(Ok(&s));
                    assert_eq!(first, compute(Ok(&s)));
                    assert!(first <= 100);
                }
            }
        }
    }
}
