//! Smoke-test consumer
//!
//! Subscribes to one topic on a Kafka-compatible cluster, polls forever,
//! and appends every received record as a `key:value` line to the output
//! file. Runs until terminated or until a consumer fault ends the loop.

use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kafka_smoke::consumer::run_poll_loop;
use kafka_smoke::{
    shutdown, ClusterType, ConnectionSettings, ConsumerSession, OutputWriter, Supervisor,
};

/// Receive test records from a Kafka-compatible cluster forever.
#[derive(Debug, Parser)]
#[command(name = "smoke-consumer")]
struct Args {
    /// Topic to receive test records from.
    topic: String,

    /// SASL username (ignored for insecure clusters).
    username: String,

    /// SASL password (ignored for insecure clusters).
    password: String,

    /// Path to the CA trust bundle (PEM).
    trust_store: String,

    /// Trust bundle passphrase (accepted for compatibility; unused for PEM bundles).
    trust_store_password: String,

    /// Comma-separated broker bootstrap addresses.
    bootstrap_servers: String,

    /// File that received records are appended to, one key:value line each.
    output_file: String,

    /// Cluster type: eventstreams, confluent, or insecure.
    #[arg(value_parser = ClusterType::from_str)]
    cluster: ClusterType,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let args = Args::parse();
    info!(pid = std::process::id(), "Starting smoke consumer");

    let settings = ConnectionSettings {
        cluster: args.cluster,
        bootstrap_servers: args.bootstrap_servers,
        username: args.username,
        password: args.password,
        trust_store: args.trust_store,
        trust_store_password: args.trust_store_password,
    };

    let (supervisor, shutdown_rx) = Supervisor::new();
    shutdown::install_panic_hook(supervisor.clone());
    shutdown::spawn_signal_listener(supervisor.clone());

    info!(topic = %args.topic, "Connecting consumer");
    let session = ConsumerSession::connect(&settings, &args.topic)?;
    let mut output = OutputWriter::new(&args.output_file);

    if let Err(e) = run_poll_loop(&session, &mut output, shutdown_rx).await {
        error!(error = %e, "Error consuming messages");
    }

    info!("Consumer closed");
    Ok(())
}
