//! Smoke-test producer
//!
//! Connects to a Kafka-compatible cluster and sends one test record per
//! delay interval forever, creating the topic first if it does not exist.
//! Runs until terminated or until a send fault ends the loop.

use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kafka_smoke::producer::run_send_loop;
use kafka_smoke::{admin, shutdown, ClusterType, ConnectionSettings, ProducerSession, Supervisor};

/// Send test records to a Kafka-compatible cluster forever.
#[derive(Debug, Parser)]
#[command(name = "smoke-producer")]
struct Args {
    /// Topic to send test records to.
    topic: String,

    /// SASL username (ignored for insecure clusters).
    username: String,

    /// SASL password (ignored for insecure clusters).
    password: String,

    /// Path to the CA trust bundle (PEM).
    trust_store: String,

    /// Comma-separated broker bootstrap addresses.
    bootstrap_servers: String,

    /// Trust bundle passphrase (accepted for compatibility; unused for PEM bundles).
    trust_store_password: String,

    /// Delay between records in milliseconds.
    delay_ms: u64,

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
    info!(pid = std::process::id(), "Starting smoke producer");

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

    // Create the topic just in case; faults here never stop the loop
    info!(topic = %args.topic, "Creating topic");
    admin::ensure_topic(&settings, &args.topic).await;

    info!("Connecting producer");
    let session = ProducerSession::connect(&settings, &args.topic)?;

    let delay = Duration::from_millis(args.delay_ms);
    if let Err(e) = run_send_loop(&session, delay, shutdown_rx).await {
        error!(error = %e, "Error producing messages");
    }

    session.close();
    info!("Producer closed");
    Ok(())
}
