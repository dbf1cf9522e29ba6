//! Harness error types
//!
//! One error enum covers both utilities, providing better type safety and
//! more informative messages than `Box<dyn std::error::Error>`.

use thiserror::Error;

/// Errors raised by the smoke-test harness
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The cluster-type selector did not match any known deployment mode
    #[error("unknown cluster type {0:?} (expected eventstreams, confluent, or insecure)")]
    UnknownClusterType(String),

    /// Error from the Kafka client (session creation, subscribe, receive)
    #[error("Kafka client error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    /// A record could not be handed to the client's send queue
    #[error("failed to enqueue record {index}: {source}")]
    Dispatch {
        index: u32,
        source: rdkafka::error::KafkaError,
    },

    /// IO error while writing the consumer output file
    #[error("output file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;
