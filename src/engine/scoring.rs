use std::collections::BTreeSet;

/// 初回成功時の加点
pub const FIRST_SUCCESS_BONUS: u8 = 5;
/// フルスイープ完了後のスコア
pub const SWEEP_SCORE: u8 = 100;

/// 加点ルール: +5、上限100
pub fn award_first_success(score: u8) -> u8 {
    score.saturating_add(FIRST_SUCCESS_BONUS).min(100)
}

/// キャッシュされたパフォーマンススコアと適用済みオペレーション
///
/// スコアはメトリクス更新のたびに計測値で置き換わり、初回成功で加点、
/// フルスイープ完了で 100 になる。適用済みセットはプロセス終了まで保持する。
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    score: u8,
    applied: BTreeSet<String>,
}

impl Scoreboard {
    /// 計測した健全性スコアで置き換える
    pub fn set_measured(&mut self, health: u8) {
        self.score = health.min(100);
    }

    /// 成功を記録し、加点したかどうかを返す
    pub fn record_success(&mut self, operation_id: &str) -> bool {
        if !self.applied.insert(operation_id.to_string()) {
            return false;
        }
        self.score = award_first_success(self.score);
        true
    }

    /// フルスイープ完了 (個々の成否に関係なく100にする)
    pub fn complete_sweep(&mut self) {
        self.score = SWEEP_SCORE;
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn applied(&self) -> &BTreeSet<String> {
        &self.applied
    }

    pub fn is_applied(&self, operation_id: &str) -> bool {
        self.applied.contains(operation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_adds_five() {
        assert_eq!(award_first_success(0), 5);
        assert_eq!(award_first_success(70), 75);
    }

    #[test]
    fn test_award_is_capped() {
        assert_eq!(award_first_success(97), 100);
        assert_eq!(award_first_success(100), 100);
        assert_eq!(award_first_success(u8::MAX), 100);
    }

    #[test]
    fn test_repeat_success_not_rewarded() {
        let mut board = Scoreboard::default();

        assert!(board.record_success("clean-ram"));
        assert!(!board.record_success("clean-ram"));
        assert_eq!(board.score(), 5);

        assert!(board.record_success("gpu-boost"));
        assert_eq!(board.score(), 10);
        assert_eq!(board.applied().len(), 2);
        assert!(board.is_applied("gpu-boost"));
    }

    #[test]
    fn test_bonus_is_added_to_measured_score() {
        let mut board = Scoreboard::default();
        board.set_measured(70);

        assert!(board.record_success("clean-ram"));
        assert_eq!(board.score(), 75);

        // 次の計測で置き換わるが、適用済みセットは残る
        board.set_measured(60);
        assert_eq!(board.score(), 60);
        assert!(!board.record_success("clean-ram"));
        assert_eq!(board.score(), 60);
    }

    #[test]
    fn test_sweep_sets_full_score() {
        let mut board = Scoreboard::default();
        board.set_measured(40);
        board.complete_sweep();
        assert_eq!(board.score(), SWEEP_SCORE);

        // 上限を超えない
        board.record_success("x");
        assert_eq!(board.score(), 100);
    }
}
