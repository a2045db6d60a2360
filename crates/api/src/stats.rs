//! In-process usage counters reported by `GET /api/stats`.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use turbine_core::types::Timestamp;

/// Value stored in `last_prediction_ms` before the first prediction.
const NEVER: i64 = i64::MIN;

/// Lock-free counters accumulated since process start.
#[derive(Debug)]
pub struct UsageStats {
    active_since: Timestamp,
    started: Instant,
    requests_total: AtomicU64,
    predictions_successful: AtomicU64,
    predictions_failed: AtomicU64,
    prediction_latency_us: AtomicU64,
    last_prediction_ms: AtomicI64,
}

/// Point-in-time view of [`UsageStats`].
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub requests_total: u64,
    pub predictions_successful: u64,
    pub predictions_failed: u64,
    /// Share of prediction requests that succeeded; `1.0` before any request.
    pub success_rate: f64,
    /// Mean latency of prediction requests in milliseconds.
    pub average_response_time_ms: f64,
    pub last_prediction: Option<Timestamp>,
    pub active_since: Timestamp,
    pub uptime_secs: u64,
}

impl Default for UsageStats {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageStats {
    pub fn new() -> Self {
        Self {
            active_since: Utc::now(),
            started: Instant::now(),
            requests_total: AtomicU64::new(0),
            predictions_successful: AtomicU64::new(0),
            predictions_failed: AtomicU64::new(0),
            prediction_latency_us: AtomicU64::new(0),
            last_prediction_ms: AtomicI64::new(NEVER),
        }
    }

    /// Count one handled request of any kind.
    pub fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one prediction request (single or batch) and its latency.
    pub fn record_prediction(&self, success: bool, latency: Duration) {
        let counter = if success {
            &self.predictions_successful
        } else {
            &self.predictions_failed
        };
        counter.fetch_add(1, Ordering::Relaxed);

        let micros = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX);
        self.prediction_latency_us
            .fetch_add(micros, Ordering::Relaxed);

        if success {
            self.last_prediction_ms
                .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let successful = self.predictions_successful.load(Ordering::Relaxed);
        let failed = self.predictions_failed.load(Ordering::Relaxed);
        let predictions = successful + failed;
        let latency_us = self.prediction_latency_us.load(Ordering::Relaxed);

        let (success_rate, average_response_time_ms) = if predictions == 0 {
            (1.0, 0.0)
        } else {
            (
                successful as f64 / predictions as f64,
                latency_us as f64 / predictions as f64 / 1000.0,
            )
        };

        let last_prediction = match self.last_prediction_ms.load(Ordering::Relaxed) {
            NEVER => None,
            ms => DateTime::from_timestamp_millis(ms),
        };

        StatsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            predictions_successful: successful,
            predictions_failed: failed,
            success_rate,
            average_response_time_ms,
            last_prediction,
            active_since: self.active_since,
            uptime_secs: self.started.elapsed().as_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_counters_are_empty() {
        let snapshot = UsageStats::new().snapshot();
        assert_eq!(snapshot.requests_total, 0);
        assert_eq!(snapshot.predictions_successful, 0);
        assert_eq!(snapshot.success_rate, 1.0);
        assert_eq!(snapshot.average_response_time_ms, 0.0);
        assert!(snapshot.last_prediction.is_none());
    }

    #[test]
    fn predictions_update_rate_and_latency() {
        let stats = UsageStats::new();
        stats.record_request();
        stats.record_request();
        stats.record_request();
        stats.record_prediction(true, Duration::from_millis(10));
        stats.record_prediction(true, Duration::from_millis(20));
        stats.record_prediction(false, Duration::from_millis(30));

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.requests_total, 3);
        assert_eq!(snapshot.predictions_successful, 2);
        assert_eq!(snapshot.predictions_failed, 1);
        assert!((snapshot.success_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!((snapshot.average_response_time_ms - 20.0).abs() < 1e-9);
        assert!(snapshot.last_prediction.is_some());
    }

    #[test]
    fn failures_alone_leave_last_prediction_unset() {
        let stats = UsageStats::new();
        stats.record_prediction(false, Duration::from_millis(1));
        assert!(stats.snapshot().last_prediction.is_none());
        assert_eq!(stats.snapshot().success_rate, 0.0);
    }
}
