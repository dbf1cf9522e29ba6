//! Connection settings
//!
//! One immutable struct holds everything needed to reach the cluster. It is
//! built from the CLI arguments at process start and passed by reference
//! into the profile builder and the session constructors.

use crate::cluster::ClusterType;

/// Immutable per-process connection settings
pub struct ConnectionSettings {
    /// Which deployment mode the cluster runs in
    pub cluster: ClusterType,
    /// Comma-separated broker bootstrap addresses (e.g., "kafka1:9093,kafka2:9093")
    pub bootstrap_servers: String,
    /// SASL username (unused for insecure clusters)
    pub username: String,
    /// SASL password (unused for insecure clusters)
    pub password: String,
    /// Path to the CA trust bundle (PEM) used for TLS verification
    pub trust_store: String,
    /// Trust-store passphrase. Accepted for command-line compatibility with
    /// the Java harness; PEM trust bundles are not passphrase-protected, so
    /// it maps to no client option.
    pub trust_store_password: String,
}

/// Custom Debug implementation that redacts credentials
impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("cluster", &self.cluster)
            .field("bootstrap_servers", &self.bootstrap_servers)
            // REDACT sensitive credentials to prevent log exposure
            .field("username", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .field("trust_store", &self.trust_store)
            .field("trust_store_password", &"[REDACTED]")
            .finish()
    }
}
