//! In-process signal bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`SignalBus`] fans every published [`SignalEvent`] out to all current
//! subscribers. It is designed to be shared via `Arc<SignalBus>`.

use chrono::Utc;
use medboard_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// DashboardSignal
// ---------------------------------------------------------------------------

/// A signal exchanged between dashboard page components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardSignal {
    /// Ask the dashboard to switch into edit mode.
    ActivateEditMode,
    /// The reporting period changed (e.g. `"month"`, `"week"`).
    PeriodChanged { period: String },
    /// Widgets should re-fetch their data.
    RefreshRequested,
}

impl DashboardSignal {
    pub fn period_changed(period: impl Into<String>) -> Self {
        Self::PeriodChanged {
            period: period.into(),
        }
    }

    /// Short name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ActivateEditMode => "activate_edit_mode",
            Self::PeriodChanged { .. } => "period_changed",
            Self::RefreshRequested => "refresh_requested",
        }
    }
}

// ---------------------------------------------------------------------------
// SignalEvent
// ---------------------------------------------------------------------------

/// A published signal together with its publication time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalEvent {
    pub signal: DashboardSignal,
    pub timestamp: Timestamp,
}

impl SignalEvent {
    pub fn new(signal: DashboardSignal) -> Self {
        Self {
            signal,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// SignalBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// In-process fan-out signal bus.
///
/// # Usage
///
/// ```rust
/// use medboard_events::bus::{DashboardSignal, SignalBus};
///
/// let bus = SignalBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(DashboardSignal::ActivateEditMode);
/// assert_eq!(rx.try_recv().unwrap().signal, DashboardSignal::ActivateEditMode);
/// ```
pub struct SignalBus {
    sender: broadcast::Sender<SignalEvent>,
}

impl SignalBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed signals are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a signal to all current subscribers.
    ///
    /// Signals published while nobody is subscribed are dropped.
    pub fn publish(&self, signal: DashboardSignal) {
        tracing::debug!(signal = signal.name(), "Publishing dashboard signal");
        // SendError only means there are zero receivers.
        let _ = self.sender.send(SignalEvent::new(signal));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SignalEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = SignalBus::default();
        let mut rx = bus.subscribe();

        bus.publish(DashboardSignal::period_changed("week"));

        let received = rx.recv().await.expect("should receive the signal");
        assert_eq!(
            received.signal,
            DashboardSignal::PeriodChanged {
                period: "week".to_string()
            }
        );
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_signal() {
        let bus = SignalBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(DashboardSignal::RefreshRequested);

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1.signal, DashboardSignal::RefreshRequested);
        assert_eq!(e2.signal, DashboardSignal::RefreshRequested);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = SignalBus::default();
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(DashboardSignal::ActivateEditMode);
    }

    #[test]
    fn signals_serialize_with_type_tag() {
        let json = serde_json::to_value(DashboardSignal::period_changed("day")).unwrap();
        assert_eq!(json["type"], "period_changed");
        assert_eq!(json["period"], "day");

        let json = serde_json::to_value(DashboardSignal::ActivateEditMode).unwrap();
        assert_eq!(json["type"], "activate_edit_mode");
    }
}
