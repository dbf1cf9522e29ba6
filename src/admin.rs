//! Topic administration
//!
//! Best-effort topic creation at producer startup. Creation faults never
//! abort the harness: an already-existing topic is expected and logged as
//! informational, and anything else is logged as an error while the send
//! loop still proceeds.

use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::types::RDKafkaErrorCode;
use tracing::{error, info};

use crate::config::ConnectionSettings;
use crate::constants::{ADMIN_OPERATION_TIMEOUT, TOPIC_PARTITIONS, TOPIC_REPLICATION};
use crate::profile::ConnectionProfile;

/// Whether a topic-creation error code means the topic is already usable
pub(crate) fn creation_error_is_benign(code: RDKafkaErrorCode) -> bool {
    matches!(code, RDKafkaErrorCode::TopicAlreadyExists)
}

/// Create the topic if it does not exist yet.
///
/// Uses the fixed layout for smoke-test topics (1 partition, replication
/// factor 3). All faults are logged and swallowed so the caller can attempt
/// to send regardless.
pub async fn ensure_topic(settings: &ConnectionSettings, topic: &str) {
    let admin: AdminClient<DefaultClientContext> =
        match ConnectionProfile::admin(settings).client_config().create() {
            Ok(admin) => admin,
            Err(e) => {
                error!(error = %e, "Failed to create admin client");
                return;
            }
        };

    let new_topic = NewTopic::new(topic, TOPIC_PARTITIONS, TopicReplication::Fixed(TOPIC_REPLICATION));
    let opts = AdminOptions::new().operation_timeout(Some(ADMIN_OPERATION_TIMEOUT));

    match admin.create_topics(&[new_topic], &opts).await {
        Ok(results) => {
            for result in results {
                match result {
                    Ok(name) => info!(topic = %name, "Created topic"),
                    Err((name, code)) if creation_error_is_benign(code) => {
                        info!(topic = %name, "Topic exists");
                    }
                    Err((name, code)) => {
                        error!(topic = %name, code = %code, "Topic creation failed");
                    }
                }
            }
        }
        Err(e) => error!(error = %e, "Topic creation request failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_is_benign() {
        assert!(creation_error_is_benign(
            RDKafkaErrorCode::TopicAlreadyExists
        ));
    }

    #[test]
    fn test_other_creation_faults_are_not_benign() {
        assert!(!creation_error_is_benign(
            RDKafkaErrorCode::InvalidReplicationFactor
        ));
        assert!(!creation_error_is_benign(RDKafkaErrorCode::InvalidTopic));
        assert!(!creation_error_is_benign(
            RDKafkaErrorCode::TopicAuthorizationFailed
        ));
        assert!(!creation_error_is_benign(RDKafkaErrorCode::RequestTimedOut));
    }
}
