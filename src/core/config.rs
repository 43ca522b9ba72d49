//! Environment-based auto-configuration
//!
//! Recognizes the `BETTERSTACK_TOKEN` / `BETTERSTACK_INGEST_URL` pair. A
//! half-configured pair is a configuration error, never a silent downgrade.

use std::env;

use crate::core::context::Context;
use crate::core::error::{MultilogError, Result};
use crate::core::logger::{Logger, LoggerBuilder};
use crate::sinks::ConsoleSink;

#[cfg(feature = "betterstack")]
use crate::sinks::BetterstackSink;

pub const ENV_TOKEN: &str = "BETTERSTACK_TOKEN";
pub const ENV_INGEST_URL: &str = "BETTERSTACK_INGEST_URL";

#[derive(Debug, Clone, Default)]
pub struct Config {
    betterstack_token: Option<String>,
    betterstack_ingest_url: Option<String>,
    default_context: Context,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the remote-destination settings from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_pair(env::var(ENV_TOKEN).ok(), env::var(ENV_INGEST_URL).ok())
    }

    /// Validate a token/ingest-url pair: both present, or neither.
    pub fn from_pair(token: Option<String>, ingest_url: Option<String>) -> Result<Self> {
        match (&token, &ingest_url) {
            (Some(_), None) => Err(MultilogError::config(format!(
                "{ENV_TOKEN} is set but {ENV_INGEST_URL} is missing"
            ))),
            (None, Some(_)) => Err(MultilogError::config(format!(
                "{ENV_INGEST_URL} is set but {ENV_TOKEN} is missing"
            ))),
            _ => Ok(Self {
                betterstack_token: token,
                betterstack_ingest_url: ingest_url,
                default_context: Context::new(),
            }),
        }
    }

    #[must_use]
    pub fn with_default_context(mut self, context: Context) -> Self {
        self.default_context = context;
        self
    }

    pub fn has_remote(&self) -> bool {
        self.betterstack_token.is_some() && self.betterstack_ingest_url.is_some()
    }

    /// A builder pre-populated from this config: console sink always, the
    /// remote sink when the pair is configured.
    pub fn logger_builder(&self) -> Result<LoggerBuilder> {
        #[allow(unused_mut)]
        let mut builder = Logger::builder()
            .sink(ConsoleSink::new())
            .default_context(self.default_context.clone());

        #[cfg(feature = "betterstack")]
        if let (Some(token), Some(url)) = (&self.betterstack_token, &self.betterstack_ingest_url)
        {
            builder = builder.sink(BetterstackSink::new(token.clone(), url.clone()));
        }

        #[cfg(not(feature = "betterstack"))]
        if self.has_remote() {
            return Err(MultilogError::config(
                "remote destination configured but the 'betterstack' feature is disabled",
            ));
        }

        Ok(builder)
    }

    pub fn build_logger(&self) -> Result<Logger> {
        Ok(self.logger_builder()?.build())
    }
}
