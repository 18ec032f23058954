//! Ctrl+C handling for the publish settle delay

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};

/// How the settle delay ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Elapsed,
    Cancelled,
}

/// Wait out the settle delay, stopping early on Ctrl+C
pub async fn settle(delay: Duration) -> SettleOutcome {
    let ctrl_c = async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl+C signal received"),
            Err(e) => {
                error!("Failed to listen for Ctrl+C signal: {}", e);
                // Without a signal listener the full delay still applies
                std::future::pending::<()>().await;
            }
        }
    };

    settle_or_cancel(delay, ctrl_c).await
}

/// Wait for `delay` unless `cancel` completes first
pub async fn settle_or_cancel<F>(delay: Duration, cancel: F) -> SettleOutcome
where
    F: Future<Output = ()>,
{
    if delay.is_zero() {
        return SettleOutcome::Elapsed;
    }

    info!("Waiting {}s before publishing...", delay.as_secs());

    tokio::select! {
        _ = sleep(delay) => SettleOutcome::Elapsed,
        _ = cancel => SettleOutcome::Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delay_elapses() {
        let outcome =
            settle_or_cancel(Duration::from_millis(20), std::future::pending::<()>()).await;
        assert_eq!(outcome, SettleOutcome::Elapsed);
    }

    #[tokio::test]
    async fn test_cancel_wins_over_long_delay() {
        let outcome = settle_or_cancel(Duration::from_secs(3600), async {}).await;
        assert_eq!(outcome, SettleOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_zero_delay_skips_wait() {
        let outcome = settle_or_cancel(Duration::ZERO, async {}).await;
        assert_eq!(outcome, SettleOutcome::Elapsed);
    }
}
