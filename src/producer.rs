//! Producer session and send loop
//!
//! Wraps rdkafka's `FutureProducer` bound to one topic and drives the
//! unbounded send loop: one record per delay interval, dispatched
//! fire-and-forget, with a cyclic sequence number in the payload.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::ConnectionSettings;
use crate::constants::{FLUSH_TIMEOUT, MESSAGE_INDEX_WRAP, MESSAGE_KEY};
use crate::error::{HarnessError, Result};
use crate::profile::ConnectionProfile;

/// Successor of a message index, wrapping past the bound back to zero
pub fn next_index(index: u32) -> u32 {
    if index < MESSAGE_INDEX_WRAP {
        index + 1
    } else {
        0
    }
}

/// Payload text for one message index
fn message_value(index: u32) -> String {
    format!("Message index {index}")
}

/// Current wall-clock time as a millisecond record timestamp
fn wall_clock_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Sending session bound to one topic
pub struct ProducerSession {
    producer: FutureProducer,
    topic: String,
}

impl ProducerSession {
    /// Create the producer from the connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the client rejects the configuration. The
    /// broker itself is contacted lazily, so an unreachable cluster
    /// surfaces later, on dispatch.
    pub fn connect(settings: &ConnectionSettings, topic: &str) -> Result<Self> {
        let producer: FutureProducer = ConnectionProfile::producer(settings, topic)
            .client_config()
            .create()?;

        Ok(Self {
            producer,
            topic: topic.to_string(),
        })
    }

    /// Topic this session sends to
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Enqueue one test record, fire-and-forget.
    ///
    /// Returns as soon as the record is handed to the client's send queue.
    /// Delivery happens in the background; the delivery result is
    /// deliberately not awaited and a failed delivery is not retried.
    pub fn dispatch(&self, index: u32) -> Result<()> {
        let value = message_value(index);
        let record = FutureRecord::to(&self.topic)
            .key(MESSAGE_KEY)
            .payload(&value)
            .timestamp(wall_clock_ms());

        match self.producer.send_result(record) {
            Ok(_delivery) => Ok(()),
            Err((source, _record)) => Err(HarnessError::Dispatch { index, source }),
        }
    }

    /// Flush pending records before the session is dropped
    pub fn close(&self) {
        if let Err(e) = self.producer.flush(FLUSH_TIMEOUT) {
            warn!(error = %e, "Flush on close did not complete");
        }
    }
}

impl std::fmt::Debug for ProducerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProducerSession")
            .field("topic", &self.topic)
            .finish()
    }
}

/// Send test records until cancelled or faulted.
///
/// Each iteration dispatches one record and then sleeps for `delay`,
/// breaking out as soon as the shutdown channel turns true. An enqueue
/// failure ends the loop; there is no retry or backoff.
pub async fn run_send_loop(
    session: &ProducerSession,
    delay: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    info!(topic = %session.topic(), "Starting sending events");

    let mut index: u32 = 0;
    while !*shutdown.borrow() {
        session.dispatch(index)?;
        info!(index, "Record sent");

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown.changed() => break,
        }

        index = next_index(index);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_index_increments_below_bound() {
        assert_eq!(next_index(0), 1);
        assert_eq!(next_index(1), 2);
        assert_eq!(next_index(499_999), 500_000);
        assert_eq!(next_index(MESSAGE_INDEX_WRAP - 1), MESSAGE_INDEX_WRAP);
    }

    #[test]
    fn test_next_index_wraps_at_bound() {
        assert_eq!(next_index(MESSAGE_INDEX_WRAP), 0);
    }

    #[test]
    fn test_next_index_never_skips() {
        let mut seen = 0;
        for n in 0..1_000 {
            assert_eq!(next_index(n), n + 1);
            seen += 1;
        }
        assert_eq!(seen, 1_000);
    }

    #[test]
    fn test_message_value_format() {
        assert_eq!(message_value(0), "Message index 0");
        assert_eq!(message_value(999_999), "Message index 999999");
    }

    #[test]
    fn test_wall_clock_is_past_epoch() {
        assert!(wall_clock_ms() > 0);
    }
}
