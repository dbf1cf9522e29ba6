//! Connectivity smoke-test harness for Kafka-compatible clusters
//!
//! Two thin utilities share this library: a producer that sends one test
//! record per delay interval forever, and a consumer that polls a topic and
//! appends every record to an output file. All protocol work is delegated
//! to rdkafka; this crate only builds connection profiles, wraps the client
//! sessions, and runs the two cancellation-aware event loops.
//!
//! ## Modules
//!
//! - **cluster**: the three-way deployment-mode selector
//! - **config**: immutable per-process connection settings
//! - **profile**: pure construction of the client option map
//! - **admin**: best-effort topic creation at producer startup
//! - **producer**: sending session and send loop
//! - **consumer**: receiving session, poll loop, and output writer
//! - **shutdown**: the supervisor both termination paths converge on

pub mod admin;
pub mod cluster;
pub mod config;
pub mod constants;
pub mod consumer;
pub mod error;
pub mod producer;
pub mod profile;
pub mod shutdown;

pub use cluster::ClusterType;
pub use config::ConnectionSettings;
pub use consumer::{ConsumerSession, OutputWriter, ReceivedRecord};
pub use error::{HarnessError, Result};
pub use producer::ProducerSession;
pub use profile::ConnectionProfile;
pub use shutdown::Supervisor;
