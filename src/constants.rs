//! Harness constants
//!
//! Centralizes the fixed values shared by the producer and consumer
//! utilities: record contents, loop timing, topic layout, and the
//! client identities reported to the broker.

use std::time::Duration;

// ===== Record contents =====

/// Key attached to every produced test record.
pub const MESSAGE_KEY: &str = "test";

/// Highest message index before the sequence wraps back to zero.
///
/// The counter is cyclic: indexes run 0..=MESSAGE_INDEX_WRAP and then
/// start over. It is never persisted across runs.
pub const MESSAGE_INDEX_WRAP: u32 = 999_999;

// ===== Loop timing =====

/// How long the consumer waits for a record before logging an empty poll.
pub const POLL_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on the producer's flush when the session closes.
pub const FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

// ===== Topic layout =====

/// Partition count for the topic created at producer startup.
pub const TOPIC_PARTITIONS: i32 = 1;

/// Replication factor for the topic created at producer startup.
pub const TOPIC_REPLICATION: i32 = 3;

/// Operation timeout for the topic-creation request.
pub const ADMIN_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

// ===== Producer tuning =====

/// Batching delay handed to the client (linger.ms).
pub const PRODUCER_LINGER_MS: i32 = 500;

/// Batch size handed to the client (batch.size).
pub const PRODUCER_BATCH_SIZE: i32 = 65_535;

// ===== Client identities =====

/// client.id for the consumer session.
pub const CONSUMER_CLIENT_ID: &str = "smoke-consumer";

/// group.id for the consumer session. Offset handling stays on the
/// client's group-based auto-commit defaults.
pub const CONSUMER_GROUP_ID: &str = "smoke-consumer-group";

/// client.id for the admin client used during producer startup.
pub const ADMIN_CLIENT_ID: &str = "smoke-admin";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_bound_value() {
        assert_eq!(MESSAGE_INDEX_WRAP, 999_999);
    }

    #[test]
    fn test_poll_timeout_is_five_seconds() {
        assert_eq!(POLL_TIMEOUT, Duration::from_secs(5));
    }

    #[test]
    fn test_topic_layout() {
        assert_eq!(TOPIC_PARTITIONS, 1);
        assert_eq!(TOPIC_REPLICATION, 3);
    }
}
