//! Async wrapper around the logger core
//!
//! Every logging operation offloads the synchronous dispatch to
//! `tokio::task::spawn_blocking` and returns a future that completes when
//! dispatch finishes, keeping async callers unblocked during sink I/O.
//! Context mutations are deliberately not offloaded: they run synchronously
//! so their effect is visible to any `log` call issued after they return.

use std::future::Future;
use std::panic::Location;
use std::sync::Arc;

use serde_json::Value;
use tokio::task;

use crate::core::config::Config;
use crate::core::context::Context;
use crate::core::error::Result;
use crate::core::level::LogLevel;
use crate::core::logger::{
    endpoint_content, endpoint_message, exception_content, LoggerBuilder, LoggerCore,
};

/// Non-blocking multi-destination logger for async callers.
///
/// Dispatch semantics are identical to [`crate::Logger`]: per call, sinks
/// are visited sequentially in insertion order with isolated failures. Two
/// concurrent `log` futures may interleave arbitrarily relative to each
/// other. Once dispatch has begun it runs to completion; there is no
/// cancellation and no per-sink timeout beyond what a sink's own client
/// enforces.
///
/// # Example
///
/// ```no_run
/// use multilog::{Logger, LogLevel};
/// use multilog::sinks::ConsoleSink;
///
/// # async fn run() {
/// let logger = Logger::builder().sink(ConsoleSink::new()).build_async();
/// logger.log(LogLevel::Info, "user signed in").await;
/// logger.close().await;
/// # }
/// ```
pub struct AsyncLogger {
    core: Arc<LoggerCore>,
}

impl AsyncLogger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Build an async logger from `BETTERSTACK_TOKEN` /
    /// `BETTERSTACK_INGEST_URL`, like [`crate::Logger::from_env`].
    pub fn from_env() -> Result<AsyncLogger> {
        Ok(Config::from_env()?.logger_builder()?.build_async())
    }

    pub(crate) fn from_core(core: Arc<LoggerCore>) -> Self {
        Self { core }
    }

    /// Send one entry to all configured sinks without blocking the caller.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> impl Future<Output = ()> {
        let caller = Location::caller();
        let core = Arc::clone(&self.core);
        let message = message.into();
        run_blocking(move || core.log(level, message, None, Some(caller)))
    }

    /// Send one entry with call-site content merged on top of the default
    /// context.
    #[track_caller]
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: Context,
    ) -> impl Future<Output = ()> {
        let caller = Location::caller();
        let core = Arc::clone(&self.core);
        let message = message.into();
        run_blocking(move || core.log(level, message, Some(context), Some(caller)))
    }

    /// Log an HTTP endpoint invocation with full request details at Info.
    #[track_caller]
    #[allow(clippy::too_many_arguments)]
    pub fn log_endpoint(
        &self,
        endpoint_name: &str,
        method: &str,
        path: &str,
        headers: Value,
        query_params: Option<Value>,
        body: Option<Value>,
        context: Option<Context>,
    ) -> impl Future<Output = ()> {
        let caller = Location::caller();
        let core = Arc::clone(&self.core);
        let message = endpoint_message(endpoint_name);
        let content = endpoint_content(
            endpoint_name,
            method,
            path,
            headers,
            query_params,
            body,
            context.as_ref(),
        );
        run_blocking(move || core.log(LogLevel::Info, message, Some(content), Some(caller)))
    }

    /// Log an error with its type, message, and cause chain at Error.
    ///
    /// The error is rendered eagerly, before the work is offloaded, so the
    /// error value itself does not need to cross threads.
    #[track_caller]
    pub fn log_exception<E: std::error::Error>(
        &self,
        message: impl Into<String>,
        error: &E,
        context: Option<Context>,
    ) -> impl Future<Output = ()> {
        let caller = Location::caller();
        let core = Arc::clone(&self.core);
        let message = message.into();
        let content = exception_content(error, context.as_ref());
        run_blocking(move || core.log(LogLevel::Error, message, Some(content), Some(caller)))
    }

    /// Overwrite-merge fields into the default context.
    ///
    /// Executes immediately and synchronously; the mutation is visible to
    /// every `log` call issued after this returns.
    pub fn update_context(&self, context: Context) {
        self.core.update_context(&context);
    }

    /// Remove keys from the default context, atomic-or-nothing. Synchronous,
    /// like [`update_context`](AsyncLogger::update_context).
    pub fn remove_context<I, S>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.core.remove_context(keys)
    }

    /// Clear the default context. Synchronous.
    pub fn clear_context(&self) {
        self.core.clear_context();
    }

    /// Close every sink without blocking the caller.
    pub fn close(&self) -> impl Future<Output = ()> {
        let core = Arc::clone(&self.core);
        run_blocking(move || core.close())
    }
}

fn run_blocking(job: impl FnOnce() + Send + 'static) -> impl Future<Output = ()> {
    let handle = task::spawn_blocking(job);
    async move {
        if let Err(err) = handle.await {
            eprintln!("[multilog] background dispatch failed: {err}");
        }
    }
}
