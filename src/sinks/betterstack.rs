//! Betterstack sink for remote log ingestion

use reqwest::blocking::Client;
use std::time::Duration;

use crate::core::context::Context;
use crate::core::error::Result;
use crate::core::level::LogLevel;
use crate::core::payload::LogPayload;
use crate::core::sink::{Sink, SinkOptions};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sink that POSTs each payload to a Betterstack ingest URL as JSON.
///
/// The HTTP client is created lazily on the first write and dropped on
/// [`close`](Sink::close). A non-2xx response is a delivery failure.
///
/// # Example
///
/// ```no_run
/// use multilog::Logger;
/// use multilog::sinks::BetterstackSink;
///
/// let sink = BetterstackSink::new("token", "https://in.logs.betterstack.com");
/// let logger = Logger::builder().sink(sink).build();
/// logger.info("shipped to the ingest endpoint");
/// ```
pub struct BetterstackSink {
    options: SinkOptions,
    token: String,
    ingest_url: String,
    timeout: Duration,
    client: Option<Client>,
}

impl BetterstackSink {
    pub fn new(token: impl Into<String>, ingest_url: impl Into<String>) -> Self {
        Self {
            options: SinkOptions::default(),
            token: token.into(),
            ingest_url: ingest_url.into(),
            timeout: DEFAULT_TIMEOUT,
            client: None,
        }
    }

    /// Request timeout applied when the client is built.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set this sink's own context overlay.
    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.options = self.options.with_context(context);
        self
    }

    /// Restrict the levels this sink emits.
    #[must_use]
    pub fn with_levels(mut self, levels: impl IntoIterator<Item = LogLevel>) -> Self {
        self.options = self.options.with_levels(levels);
        self
    }
}

impl Sink for BetterstackSink {
    fn options(&self) -> &SinkOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut SinkOptions {
        &mut self.options
    }

    fn write(&mut self, payload: &LogPayload) -> Result<()> {
        if self.client.is_none() {
            self.client = Some(Client::builder().timeout(self.timeout).build()?);
        }
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| crate::MultilogError::Io(std::io::Error::other("client not built")))?;

        let response = client
            .post(&self.ingest_url)
            .bearer_auth(&self.token)
            .json(payload)
            .send()?;
        response.error_for_status()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.client = None;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "betterstack"
    }
}
