//! Periodic alert dispatcher.
//!
//! [`AlertDispatcher`] runs as a single background task. Each tick selects a
//! bounded batch of unsent alert events joined to their users' push
//! subscriptions, attempts one push per row, and stamps `sent_at` on every
//! event whose push succeeded. Failed events stay queued for the next tick
//! until they exhaust `MAX_RETRY_PUSH`. Events whose user has no
//! subscription are never selected and stay queued indefinitely.
//!
//! Delivery is at-least-once: a crash between a successful push and the
//! `sent_at` update re-sends that event after restart.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use dealwatch_core::alert::DealAlertPayload;
use dealwatch_core::config::{parse_or, process_env, ConfigError};
use dealwatch_core::types::DbId;
use dealwatch_db::repositories::AlertEventRepo;
use dealwatch_db::DbPool;
use tokio_util::sync::CancellationToken;

use crate::delivery::web_push::{PushSender, PushTarget};

const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
const DEFAULT_BATCH_SIZE: i64 = 200;
const DEFAULT_MAX_ATTEMPTS: i32 = 3;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Scheduling and retry settings for the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Pause between the end of one tick and the start of the next.
    pub interval: Duration,
    /// Maximum rows (event x subscription) handled per tick.
    pub batch_size: i64,
    /// Failed attempts after which an event is no longer selected.
    /// `0` retries forever.
    pub max_attempts: i32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            batch_size: DEFAULT_BATCH_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl DispatchConfig {
    /// Load dispatcher settings from the environment.
    ///
    /// | Env Var             | Default |
    /// |---------------------|---------|
    /// | `POLL_INTERVAL_SEC` | `30`    |
    /// | `POLL_BATCH_SIZE`   | `200`   |
    /// | `MAX_RETRY_PUSH`    | `3`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let interval_secs: u64 =
            parse_or(lookup, "POLL_INTERVAL_SEC", DEFAULT_POLL_INTERVAL_SECS)?;
        if interval_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "POLL_INTERVAL_SEC",
                value: "0".to_string(),
            });
        }

        let batch_size: i64 = parse_or(lookup, "POLL_BATCH_SIZE", DEFAULT_BATCH_SIZE)?;
        if batch_size < 1 {
            return Err(ConfigError::Invalid {
                key: "POLL_BATCH_SIZE",
                value: batch_size.to_string(),
            });
        }

        let max_attempts: i32 = parse_or(lookup, "MAX_RETRY_PUSH", DEFAULT_MAX_ATTEMPTS)?;
        if max_attempts < 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_RETRY_PUSH",
                value: max_attempts.to_string(),
            });
        }

        Ok(Self {
            interval: Duration::from_secs(interval_secs),
            batch_size,
            max_attempts,
        })
    }
}

// ---------------------------------------------------------------------------
// TickReport
// ---------------------------------------------------------------------------

/// Outcome counts for a single tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Push attempts made (one per selected row).
    pub attempted: usize,
    /// Attempts that succeeded.
    pub delivered: usize,
    /// Attempts that failed, including those refused by a disabled sender.
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// AlertDispatcher
// ---------------------------------------------------------------------------

/// Background service that delivers queued alert events via web push.
pub struct AlertDispatcher {
    pool: DbPool,
    sender: Arc<dyn PushSender>,
    config: DispatchConfig,
}

impl AlertDispatcher {
    pub fn new(pool: DbPool, sender: Arc<dyn PushSender>, config: DispatchConfig) -> Self {
        Self {
            pool,
            sender,
            config,
        }
    }

    /// Run the dispatch loop until `cancel` fires.
    ///
    /// Ticks never overlap: the next sleep starts only after the previous
    /// batch has completed. A failing tick is logged and the loop carries on
    /// with the next one. Cancellation is observed between ticks and while
    /// sleeping; an in-progress tick runs to completion.
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            batch_size = self.config.batch_size,
            max_attempts = self.config.max_attempts,
            "Alert dispatcher started"
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            match self.tick().await {
                Ok(report) if report.attempted > 0 => {
                    tracing::info!(
                        attempted = report.attempted,
                        delivered = report.delivered,
                        failed = report.failed,
                        "Dispatch tick completed"
                    );
                }
                Ok(_) => tracing::debug!("Dispatch tick: nothing pending"),
                Err(e) => tracing::error!(error = %e, "Dispatch tick failed"),
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }

        tracing::info!("Alert dispatcher stopped");
    }

    /// Process one batch of pending deliveries.
    ///
    /// An event is pushed to every subscription of its user. A failed round
    /// counts once against the event's retry budget, however many devices
    /// failed, and not at all if any device accepted the push.
    pub async fn tick(&self) -> Result<TickReport, sqlx::Error> {
        let rows = AlertEventRepo::list_pending_deliveries(
            &self.pool,
            self.config.batch_size,
            self.config.max_attempts,
        )
        .await?;

        let mut report = TickReport::default();
        let mut delivered: HashSet<DbId> = HashSet::new();
        let mut failed: Vec<DbId> = Vec::new();

        for row in &rows {
            let payload = DealAlertPayload::new(&row.deal_id).to_json();
            let target = PushTarget {
                endpoint: &row.endpoint,
                p256dh: &row.p256dh,
                auth: &row.auth,
            };

            report.attempted += 1;
            match self.sender.send(target, &payload).await {
                Ok(()) => {
                    AlertEventRepo::mark_sent(&self.pool, row.event_id).await?;
                    delivered.insert(row.event_id);
                    report.delivered += 1;
                }
                Err(e) => {
                    report.failed += 1;
                    if !e.counts_as_attempt() {
                        tracing::debug!(event_id = row.event_id, "Push skipped: sender disabled");
                        continue;
                    }
                    tracing::warn!(
                        event_id = row.event_id,
                        user_id = %row.user_id,
                        error = %e,
                        "Push delivery attempt failed"
                    );
                    // Rows arrive grouped by event id.
                    if failed.last() != Some(&row.event_id) {
                        failed.push(row.event_id);
                    }
                }
            }
        }

        for event_id in failed.into_iter().filter(|id| !delivered.contains(id)) {
            AlertEventRepo::record_failure(&self.pool, event_id).await?;
        }

        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = DispatchConfig::from_lookup(&lookup_from(&[])).unwrap();
        assert_eq!(config.interval, Duration::from_secs(30));
        assert_eq!(config.batch_size, 200);
        assert_eq!(config.max_attempts, 3);
    }

    #[test]
    fn zero_retry_cap_means_unlimited() {
        let config =
            DispatchConfig::from_lookup(&lookup_from(&[("MAX_RETRY_PUSH", "0")])).unwrap();
        assert_eq!(config.max_attempts, 0);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let result = DispatchConfig::from_lookup(&lookup_from(&[("POLL_INTERVAL_SEC", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn non_positive_batch_is_rejected() {
        let result = DispatchConfig::from_lookup(&lookup_from(&[("POLL_BATCH_SIZE", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn negative_retry_cap_is_rejected() {
        let result = DispatchConfig::from_lookup(&lookup_from(&[("MAX_RETRY_PUSH", "-1")]));
        assert!(result.is_err());
    }
}
