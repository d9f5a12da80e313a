//! Heartbeat timer
//!
//! Owns the session's only periodic timer. Arming it again replaces the
//! previous timer, so there is never more than one running.

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Periodic heartbeat timer with ACK bookkeeping
#[derive(Debug, Default)]
pub struct HeartbeatScheduler {
    timer: Option<Interval>,
    awaiting_ack: bool,
    sent: u64,
    acked: u64,
}

impl HeartbeatScheduler {
    /// Create an unarmed scheduler
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer; the first tick fires one full `period` from now
    ///
    /// Any previously armed timer is dropped.
    pub fn start(&mut self, period: Duration) {
        if let Some(previous) = self.timer.take() {
            tracing::debug!(
                previous_ms = previous.period().as_millis(),
                period_ms = period.as_millis(),
                "Replacing heartbeat timer"
            );
        }

        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
        self.awaiting_ack = false;
    }

    /// Disarm the timer
    pub fn stop(&mut self) {
        self.timer = None;
        self.awaiting_ack = false;
    }

    /// Check if the timer is armed
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Current period, if armed
    #[must_use]
    pub fn period(&self) -> Option<Duration> {
        self.timer.as_ref().map(Interval::period)
    }

    /// Wait for the next tick
    ///
    /// Never completes while the timer is disarmed, so it can sit in a
    /// `select!` next to the socket from the start.
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending().await,
        }
    }

    /// Record a sent heartbeat
    ///
    /// Returns `false` if the previous heartbeat was never acknowledged.
    pub fn record_sent(&mut self) -> bool {
        let previous_acked = !self.awaiting_ack;
        self.awaiting_ack = true;
        self.sent += 1;
        previous_acked
    }

    /// Record a heartbeat ACK
    pub fn record_ack(&mut self) {
        self.awaiting_ack = false;
        self.acked += 1;
    }

    /// Heartbeats sent since creation
    #[must_use]
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// ACKs received since creation
    #[must_use]
    pub fn acked(&self) -> u64 {
        self.acked
    }
}
