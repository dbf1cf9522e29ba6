//! Consumer session, poll loop, and output file writer
//!
//! Wraps rdkafka's `StreamConsumer` subscribed to one topic and drives the
//! unbounded poll loop: wait up to the poll timeout for a record, log it,
//! and append it as one `key:value` line to the output file. The file is
//! opened lazily in append mode and flushed after every line so each
//! received record survives a crash immediately after being written.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::ConnectionSettings;
use crate::constants::POLL_TIMEOUT;
use crate::error::Result;
use crate::profile::ConnectionProfile;

/// One record pulled off the topic, decoded to text
#[derive(Debug, Clone)]
pub struct ReceivedRecord {
    pub key: String,
    pub value: String,
}

/// Receiving session subscribed to one topic
pub struct ConsumerSession {
    consumer: StreamConsumer,
    topic: String,
}

impl ConsumerSession {
    /// Create the consumer and subscribe it to the topic.
    ///
    /// # Errors
    ///
    /// Returns an error if the client rejects the configuration or the
    /// subscription.
    pub fn connect(settings: &ConnectionSettings, topic: &str) -> Result<Self> {
        let consumer: StreamConsumer = ConnectionProfile::consumer(settings)
            .client_config()
            .create()?;
        consumer.subscribe(&[topic])?;

        Ok(Self {
            consumer,
            topic: topic.to_string(),
        })
    }

    /// Topic this session is subscribed to
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Wait up to `timeout` for the next record.
    ///
    /// Returns `Ok(None)` on an empty poll. A client error ends the loop
    /// upstream; it is not retried here.
    pub async fn next_record(&self, timeout: Duration) -> Result<Option<ReceivedRecord>> {
        match tokio::time::timeout(timeout, self.consumer.recv()).await {
            Err(_elapsed) => Ok(None),
            Ok(Err(e)) => Err(e.into()),
            Ok(Ok(msg)) => {
                let key = msg
                    .key()
                    .map(|k| String::from_utf8_lossy(k).into_owned())
                    .unwrap_or_default();
                let value = msg
                    .payload()
                    .map(|v| String::from_utf8_lossy(v).into_owned())
                    .unwrap_or_default();
                debug!(
                    partition = msg.partition(),
                    offset = msg.offset(),
                    "Record received"
                );
                Ok(Some(ReceivedRecord { key, value }))
            }
        }
    }
}

impl std::fmt::Debug for ConsumerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsumerSession")
            .field("topic", &self.topic)
            .finish()
    }
}

/// Append-only writer for received records.
///
/// The file is created on the first append, not on construction, and every
/// line is flushed before `append` returns.
pub struct OutputWriter {
    path: PathBuf,
    file: Option<BufWriter<File>>,
}

impl OutputWriter {
    /// Create a writer for the given path without touching the filesystem
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: None,
        }
    }

    /// Path the writer appends to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one `key:value` line and flush it
    pub fn append(&mut self, key: &str, value: &str) -> Result<()> {
        let writer = match self.file.as_mut() {
            Some(writer) => writer,
            None => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?;
                self.file.insert(BufWriter::new(file))
            }
        };

        writeln!(writer, "{key}:{value}")?;
        writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for OutputWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputWriter")
            .field("path", &self.path)
            .field("open", &self.file.is_some())
            .finish()
    }
}

/// Receive records until cancelled or faulted.
///
/// Each iteration polls with the fixed timeout; every received record is
/// logged and appended to the output file. The loop breaks as soon as the
/// shutdown channel turns true, and a consumer or file error ends it.
pub async fn run_poll_loop(
    session: &ConsumerSession,
    output: &mut OutputWriter,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    info!(topic = %session.topic(), "Starting receiving events");

    while !*shutdown.borrow() {
        let polled = tokio::select! {
            polled = session.next_record(POLL_TIMEOUT) => polled?,
            _ = shutdown.changed() => break,
        };

        match polled {
            Some(record) => {
                info!("{}:{}", record.key, record.value);
                output.append(&record.key, &record.value)?;
            }
            None => debug!("0 records received"),
        }
    }

    Ok(())
}
