use std::time::Duration;

use async_trait::async_trait;

/// sequence のステップ間の待ち時間
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

/// 連続ディスパッチの間隔を制御
#[async_trait]
pub trait Pacer: Send + Sync {
    /// 次のディスパッチまで待つ
    async fn pause(&self);
}

/// 固定時間だけ待つ
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl Default for FixedDelay {
    fn default() -> Self {
        Self(DEFAULT_PACING)
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_waits() {
        let start = Instant::now();
        FixedDelay(Duration::from_millis(500)).pause().await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_returns_immediately() {
        let start = Instant::now();
        FixedDelay(Duration::ZERO).pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
