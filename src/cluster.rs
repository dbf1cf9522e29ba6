//! Cluster deployment modes
//!
//! The selector that decides which security scheme the connection profile
//! carries. Parsed exactly once from the last positional CLI argument.

use std::fmt;
use std::str::FromStr;

use crate::error::HarnessError;

/// Which kind of cluster the utilities connect to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterType {
    /// Managed Kafka service authenticating with SASL/PLAIN over TLS
    Confluent,
    /// Managed event-streaming service authenticating with SCRAM-SHA-512 over TLS
    EventStreams,
    /// Unauthenticated plaintext cluster
    Insecure,
}

impl ClusterType {
    /// Convert to the CLI selector string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterType::Confluent => "confluent",
            ClusterType::EventStreams => "eventstreams",
            ClusterType::Insecure => "insecure",
        }
    }
}

impl FromStr for ClusterType {
    type Err = HarnessError;

    /// Parse the CLI selector. Unknown selectors are an error rather than
    /// leaving the mode undecided.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "confluent" => Ok(ClusterType::Confluent),
            "eventstreams" => Ok(ClusterType::EventStreams),
            "insecure" => Ok(ClusterType::Insecure),
            _ => Err(HarnessError::UnknownClusterType(s.to_string())),
        }
    }
}

impl fmt::Display for ClusterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_type_from_str() {
        assert_eq!(
            "confluent".parse::<ClusterType>().unwrap(),
            ClusterType::Confluent
        );
        assert_eq!(
            "eventstreams".parse::<ClusterType>().unwrap(),
            ClusterType::EventStreams
        );
        assert_eq!(
            "insecure".parse::<ClusterType>().unwrap(),
            ClusterType::Insecure
        );
    }

    #[test]
    fn test_cluster_type_from_str_is_case_insensitive() {
        assert_eq!(
            "EventStreams".parse::<ClusterType>().unwrap(),
            ClusterType::EventStreams
        );
        assert_eq!(
            "CONFLUENT".parse::<ClusterType>().unwrap(),
            ClusterType::Confluent
        );
    }

    #[test]
    fn test_unknown_cluster_type_is_rejected() {
        let err = "kerberos".parse::<ClusterType>().unwrap_err();
        assert!(matches!(err, HarnessError::UnknownClusterType(s) if s == "kerberos"));

        assert!("".parse::<ClusterType>().is_err());
        assert!("event-streams".parse::<ClusterType>().is_err());
    }

    #[test]
    fn test_as_str_round_trips() {
        for cluster in [
            ClusterType::Confluent,
            ClusterType::EventStreams,
            ClusterType::Insecure,
        ] {
            assert_eq!(cluster.as_str().parse::<ClusterType>().unwrap(), cluster);
        }
    }
}
