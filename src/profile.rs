//! Connection profile construction
//!
//! Builds the flat map of client options for a given cluster type, then
//! layers on the role-specific options for the producer, consumer, or admin
//! client. Construction is pure: no network access happens here.
//!
//! ## Security
//!
//! Supported schemes per cluster type:
//! - Confluent: SASL_SSL with PLAIN (username/password over TLS)
//! - EventStreams: SASL_SSL with SCRAM-SHA-512
//! - Insecure: PLAINTEXT, no credentials, no trust material
//!
//! Credential options are assembled by one narrow function so credential
//! handling can be unit-tested (and later hardened) without touching the
//! loop logic.

use std::collections::BTreeMap;

use rdkafka::config::ClientConfig;

use crate::cluster::ClusterType;
use crate::config::ConnectionSettings;
use crate::constants::{
    ADMIN_CLIENT_ID, CONSUMER_CLIENT_ID, CONSUMER_GROUP_ID, PRODUCER_BATCH_SIZE,
    PRODUCER_LINGER_MS,
};

/// SASL credential options for one authentication mechanism.
///
/// librdkafka takes the credentials as discrete options rather than a
/// login-module string; this pair of username/password options is the
/// client's wire-compatible auth payload.
fn sasl_options(mechanism: &str, username: &str, password: &str) -> [(&'static str, String); 3] {
    [
        ("sasl.mechanism", mechanism.to_string()),
        ("sasl.username", username.to_string()),
        ("sasl.password", password.to_string()),
    ]
}

/// Flat mapping of client option names to values
#[derive(Debug, Clone, Default)]
pub struct ConnectionProfile {
    options: BTreeMap<String, String>,
}

impl ConnectionProfile {
    /// Build the security/bootstrap options shared by every role.
    ///
    /// Each cluster type contributes exactly its own scheme: the insecure
    /// profile carries no sasl.* or ssl.* options at all.
    pub fn common(settings: &ConnectionSettings) -> Self {
        let mut profile = Self::default();
        profile.set("bootstrap.servers", &settings.bootstrap_servers);

        match settings.cluster {
            ClusterType::Confluent => {
                profile.set("security.protocol", "SASL_SSL");
                for (key, value) in sasl_options("PLAIN", &settings.username, &settings.password) {
                    profile.set(key, value);
                }
                profile.set("ssl.ca.location", &settings.trust_store);
            }
            ClusterType::EventStreams => {
                profile.set("security.protocol", "SASL_SSL");
                for (key, value) in
                    sasl_options("SCRAM-SHA-512", &settings.username, &settings.password)
                {
                    profile.set(key, value);
                }
                profile.set("ssl.ca.location", &settings.trust_store);
            }
            ClusterType::Insecure => {
                profile.set("security.protocol", "PLAINTEXT");
            }
        }

        profile
    }

    /// Profile for the sending session: common options plus client id and
    /// batching parameters.
    pub fn producer(settings: &ConnectionSettings, topic: &str) -> Self {
        let mut profile = Self::common(settings);
        profile.set("client.id", format!("{topic}-producer"));
        profile.set("linger.ms", PRODUCER_LINGER_MS.to_string());
        profile.set("batch.size", PRODUCER_BATCH_SIZE.to_string());
        profile
    }

    /// Profile for the receiving session: common options plus client and
    /// group identity.
    pub fn consumer(settings: &ConnectionSettings) -> Self {
        let mut profile = Self::common(settings);
        profile.set("client.id", CONSUMER_CLIENT_ID);
        profile.set("group.id", CONSUMER_GROUP_ID);
        profile
    }

    /// Profile for the admin client used at producer startup.
    pub fn admin(settings: &ConnectionSettings) -> Self {
        let mut profile = Self::common(settings);
        profile.set("client.id", ADMIN_CLIENT_ID);
        profile.set("client.dns.lookup", "use_all_dns_ips");
        profile
    }

    /// Set a single option, replacing any previous value
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    /// Look up an option value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Whether the profile contains an option
    pub fn contains(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// Number of options in the profile
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the profile holds no options
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterate over the options in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Materialize the profile as an rdkafka client configuration
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        for (key, value) in &self.options {
            config.set(key, value);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(cluster: ClusterType) -> ConnectionSettings {
        ConnectionSettings {
            cluster,
            bootstrap_servers: "broker-0:9093".to_string(),
            username: "svc-user".to_string(),
            password: "svc-pass".to_string(),
            trust_store: "/etc/ssl/ca.pem".to_string(),
            trust_store_password: "unused".to_string(),
        }
    }

    #[test]
    fn test_confluent_profile_fields() {
        let profile = ConnectionProfile::common(&settings(ClusterType::Confluent));
        assert_eq!(profile.get("bootstrap.servers"), Some("broker-0:9093"));
        assert_eq!(profile.get("security.protocol"), Some("SASL_SSL"));
        assert_eq!(profile.get("sasl.mechanism"), Some("PLAIN"));
        assert_eq!(profile.get("sasl.username"), Some("svc-user"));
        assert_eq!(profile.get("sasl.password"), Some("svc-pass"));
        assert_eq!(profile.get("ssl.ca.location"), Some("/etc/ssl/ca.pem"));
        assert_eq!(profile.len(), 6);
    }

    #[test]
    fn test_eventstreams_profile_fields() {
        let profile = ConnectionProfile::common(&settings(ClusterType::EventStreams));
        assert_eq!(profile.get("security.protocol"), Some("SASL_SSL"));
        assert_eq!(profile.get("sasl.mechanism"), Some("SCRAM-SHA-512"));
        assert_eq!(profile.get("sasl.username"), Some("svc-user"));
        assert_eq!(profile.get("sasl.password"), Some("svc-pass"));
        assert_eq!(profile.get("ssl.ca.location"), Some("/etc/ssl/ca.pem"));
        assert_eq!(profile.len(), 6);
    }

    #[test]
    fn test_sasl_schemes_differ_only_in_mechanism() {
        let plain = ConnectionProfile::common(&settings(ClusterType::Confluent));
        let scram = ConnectionProfile::common(&settings(ClusterType::EventStreams));

        for (key, value) in plain.iter() {
            if key == "sasl.mechanism" {
                continue;
            }
            assert_eq!(scram.get(key), Some(value), "mismatch on {key}");
        }
        assert_eq!(plain.len(), scram.len());
    }

    #[test]
    fn test_insecure_profile_has_no_auth_fields() {
        let profile = ConnectionProfile::common(&settings(ClusterType::Insecure));
        assert_eq!(profile.get("bootstrap.servers"), Some("broker-0:9093"));
        assert_eq!(profile.get("security.protocol"), Some("PLAINTEXT"));
        assert_eq!(profile.len(), 2);

        // No cross-contamination from the SASL schemes
        for (key, _) in profile.iter() {
            assert!(!key.starts_with("sasl."), "unexpected option {key}");
            assert!(!key.starts_with("ssl."), "unexpected option {key}");
        }
    }

    #[test]
    fn test_trust_store_password_never_becomes_an_option() {
        for cluster in [
            ClusterType::Confluent,
            ClusterType::EventStreams,
            ClusterType::Insecure,
        ] {
            let profile = ConnectionProfile::common(&settings(cluster));
            assert!(!profile.iter().any(|(_, v)| v == "unused"));
        }
    }

    #[test]
    fn test_producer_profile_additions() {
        let profile = ConnectionProfile::producer(&settings(ClusterType::EventStreams), "orders");
        assert_eq!(profile.get("client.id"), Some("orders-producer"));
        assert_eq!(profile.get("linger.ms"), Some("500"));
        assert_eq!(profile.get("batch.size"), Some("65535"));
        // Security options are untouched by the merge
        assert_eq!(profile.get("sasl.mechanism"), Some("SCRAM-SHA-512"));
    }

    #[test]
    fn test_consumer_profile_additions() {
        let profile = ConnectionProfile::consumer(&settings(ClusterType::Confluent));
        assert_eq!(profile.get("client.id"), Some("smoke-consumer"));
        assert_eq!(profile.get("group.id"), Some("smoke-consumer-group"));
        assert_eq!(profile.get("sasl.mechanism"), Some("PLAIN"));
    }

    #[test]
    fn test_admin_profile_additions() {
        let profile = ConnectionProfile::admin(&settings(ClusterType::Insecure));
        assert_eq!(profile.get("client.id"), Some("smoke-admin"));
        assert_eq!(profile.get("client.dns.lookup"), Some("use_all_dns_ips"));
        assert!(!profile.contains("group.id"));
    }

    #[test]
    fn test_client_config_receives_every_option() {
        let profile = ConnectionProfile::producer(&settings(ClusterType::Confluent), "orders");
        let config = profile.client_config();
        for (key, value) in profile.iter() {
            assert_eq!(config.get(key), Some(value), "missing option {key}");
        }
    }

    #[test]
    fn test_set_replaces_value() {
        let mut profile = ConnectionProfile::default();
        assert!(profile.is_empty());
        profile.set("client.id", "first");
        profile.set("client.id", "second");
        assert_eq!(profile.get("client.id"), Some("second"));
        assert_eq!(profile.len(), 1);
    }
}
