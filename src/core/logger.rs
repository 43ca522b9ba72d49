//! Logger core and synchronous front-end
//!
//! `LoggerCore` holds the ordered sink sequence and the default context and
//! performs the actual dispatch. The public [`Logger`] (and the async
//! wrapper, when enabled) are thin front-ends over one shared core.

use std::panic::Location;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{json, Value};

use crate::core::config::Config;
use crate::core::context::{Context, SharedContext};
use crate::core::error::Result;
use crate::core::level::LogLevel;
use crate::core::payload::LogPayload;
use crate::core::sink::Sink;

pub(crate) struct LoggerCore {
    sinks: RwLock<Vec<Box<dyn Sink>>>,
    default_context: SharedContext,
}

impl LoggerCore {
    pub(crate) fn new(sinks: Vec<Box<dyn Sink>>, default_context: Context) -> Self {
        Self {
            sinks: RwLock::new(sinks),
            default_context: SharedContext::from_context(default_context),
        }
    }

    /// Build the payload (base fields, then default context, then caller
    /// location, then call-site content, last write winning) and dispatch it.
    pub(crate) fn log(
        &self,
        level: LogLevel,
        message: String,
        content: Option<Context>,
        caller: Option<&'static Location<'static>>,
    ) {
        let mut payload = LogPayload::new(level, message);
        let defaults = self.default_context.snapshot();
        if !defaults.is_empty() {
            payload.overlay(&defaults);
        }
        if let Some(caller) = caller {
            payload.insert("caller_file", caller.file());
            payload.insert("caller_line", caller.line());
        }
        if let Some(content) = content {
            payload.overlay(&content);
        }
        self.dispatch(&payload);
    }

    /// Deliver one payload to every sink, strictly in insertion order.
    ///
    /// A sink fault (level resolution, merge, write, or a panic) is reported
    /// on stderr and never aborts delivery to the remaining sinks, and never
    /// reaches the caller.
    fn dispatch(&self, payload: &LogPayload) {
        let mut sinks = self.sinks.write();
        for sink in sinks.iter_mut() {
            let delivery = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                payload.level().and_then(|level| {
                    if sink.accepts(level) {
                        sink.send(payload)
                    } else {
                        Ok(())
                    }
                })
            }));
            match delivery {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    eprintln!("[multilog] sink '{}' failed: {}", sink.name(), err);
                }
                Err(panic) => {
                    eprintln!(
                        "[multilog] sink '{}' panicked: {}",
                        sink.name(),
                        panic_message(&panic)
                    );
                }
            }
        }
    }

    /// Close every sink in order. Failures are reported on stderr and do not
    /// prevent the remaining sinks from closing.
    pub(crate) fn close(&self) {
        let mut sinks = self.sinks.write();
        for sink in sinks.iter_mut() {
            let outcome =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.close()));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    eprintln!("[multilog] sink '{}' close failed: {}", sink.name(), err);
                }
                Err(panic) => {
                    eprintln!(
                        "[multilog] sink '{}' panicked during close: {}",
                        sink.name(),
                        panic_message(&panic)
                    );
                }
            }
        }
    }

    pub(crate) fn update_context(&self, context: &Context) {
        self.default_context.update(context);
    }

    pub(crate) fn remove_context<I, S>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_context.remove(keys)
    }

    pub(crate) fn clear_context(&self) {
        self.default_context.clear();
    }
}

impl Drop for LoggerCore {
    fn drop(&mut self) {
        // Last handle gone: release sink resources.
        self.close();
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = panic.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Content fields for an endpoint-invocation entry.
pub(crate) fn endpoint_content(
    endpoint_name: &str,
    method: &str,
    path: &str,
    headers: Value,
    query_params: Option<Value>,
    body: Option<Value>,
    context: Option<&Context>,
) -> Context {
    let request = json!({
        "method": method,
        "path": path,
        "query": query_params.unwrap_or_else(|| json!({})),
        "headers": headers,
        "body": body.unwrap_or(Value::Null),
    });
    let mut content = Context::new()
        .with("event_source", "http_endpoint")
        .with("event_type", "endpoint_invocation")
        .with("endpoint_name", endpoint_name)
        .with("request", request);
    if let Some(extra) = context {
        content.update(extra);
    }
    content
}

pub(crate) fn endpoint_message(endpoint_name: &str) -> String {
    format!("Endpoint Invoked: {endpoint_name}")
}

/// Content fields for an error entry: static type name, message, and the
/// `source()` chain rendered as ordered frames.
pub(crate) fn exception_content<E: std::error::Error>(
    error: &E,
    context: Option<&Context>,
) -> Context {
    let mut frames = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        frames.push(format!("caused by: {cause}"));
        source = cause.source();
    }
    let mut content = Context::new()
        .with("event_type", "exception")
        .with("exception_type", std::any::type_name::<E>())
        .with("exception_message", error.to_string())
        .with("traceback", frames);
    if let Some(extra) = context {
        content.update(extra);
    }
    content
}

/// Synchronous multi-destination logger.
///
/// # Example
///
/// ```
/// use multilog::{Context, Logger, LogLevel};
/// use multilog::sinks::MemorySink;
///
/// let sink = MemorySink::new();
/// let buffer = sink.buffer();
/// let logger = Logger::builder()
///     .sink(sink)
///     .default_context(Context::new().with("service", "api"))
///     .build();
///
/// logger.log(LogLevel::Info, "user signed in");
/// assert_eq!(buffer.len(), 1);
/// ```
pub struct Logger {
    core: Arc<LoggerCore>,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Build a logger from `BETTERSTACK_TOKEN` / `BETTERSTACK_INGEST_URL`.
    ///
    /// Always includes a console sink; adds the remote sink when the pair is
    /// fully configured. Half-configured pairs are an error.
    pub fn from_env() -> Result<Logger> {
        Ok(Config::from_env()?.logger_builder()?.build())
    }

    pub(crate) fn from_core(core: Arc<LoggerCore>) -> Self {
        Self { core }
    }

    /// Send one entry to all configured sinks.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        let caller = Location::caller();
        self.core.log(level, message.into(), None, Some(caller));
    }

    /// Send one entry with call-site content merged on top of the default
    /// context. Content keys win on conflict, even over the base fields.
    #[track_caller]
    pub fn log_with_context(&self, level: LogLevel, message: impl Into<String>, context: Context) {
        let caller = Location::caller();
        self.core.log(level, message.into(), Some(context), Some(caller));
    }

    #[track_caller]
    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        let caller = Location::caller();
        self.core.log(LogLevel::Trace, message.into(), None, Some(caller));
    }

    #[track_caller]
    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        let caller = Location::caller();
        self.core.log(LogLevel::Debug, message.into(), None, Some(caller));
    }

    #[track_caller]
    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        let caller = Location::caller();
        self.core.log(LogLevel::Info, message.into(), None, Some(caller));
    }

    #[track_caller]
    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        let caller = Location::caller();
        self.core.log(LogLevel::Warning, message.into(), None, Some(caller));
    }

    #[track_caller]
    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        let caller = Location::caller();
        self.core.log(LogLevel::Error, message.into(), None, Some(caller));
    }

    #[track_caller]
    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        let caller = Location::caller();
        self.core.log(LogLevel::Critical, message.into(), None, Some(caller));
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
    ) {
        let caller = Location::caller();
        let content = endpoint_content(
            endpoint_name,
            method,
            path,
            headers,
            query_params,
            body,
            context.as_ref(),
        );
        self.core.log(
            LogLevel::Info,
            endpoint_message(endpoint_name),
            Some(content),
            Some(caller),
        );
    }

    /// Log an error with its type, message, and cause chain at Error.
    #[track_caller]
    pub fn log_exception<E: std::error::Error>(
        &self,
        message: impl Into<String>,
        error: &E,
        context: Option<Context>,
    ) {
        let caller = Location::caller();
        let content = exception_content(error, context.as_ref());
        self.core
            .log(LogLevel::Error, message.into(), Some(content), Some(caller));
    }

    /// Overwrite-merge fields into the default context.
    pub fn update_context(&self, context: Context) {
        self.core.update_context(&context);
    }

    /// Remove keys from the default context.
    ///
    /// Validated before any removal: if any key is absent, fails with
    /// [`crate::MultilogError::ContextKeys`] listing every missing key and
    /// removes nothing.
    pub fn remove_context<I, S>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.core.remove_context(keys)
    }

    pub fn clear_context(&self) {
        self.core.clear_context();
    }

    /// Close every sink. Safe to call more than once; also runs when the
    /// last handle to the logger is dropped.
    pub fn close(&self) {
        self.core.close();
    }
}

/// Builder for constructing a [`Logger`] with a fluent API.
///
/// # Example
///
/// ```
/// use multilog::{Context, Logger, LogLevel};
/// use multilog::sinks::ConsoleSink;
///
/// let logger = Logger::builder()
///     .sink(ConsoleSink::new().with_levels(LogLevel::range(LogLevel::Info..)))
///     .default_context(Context::new().with("service", "api"))
///     .build();
/// logger.info("ready");
/// ```
pub struct LoggerBuilder {
    sinks: Vec<Box<dyn Sink>>,
    default_context: Context,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            default_context: Context::new(),
        }
    }

    /// Append a sink. Insertion order is dispatch order.
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Append an already boxed sink.
    #[must_use = "builder methods return a new value"]
    pub fn boxed_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Set the default context merged into every entry.
    #[must_use = "builder methods return a new value"]
    pub fn default_context(mut self, context: Context) -> Self {
        self.default_context = context;
        self
    }

    pub fn build(self) -> Logger {
        Logger::from_core(Arc::new(LoggerCore::new(self.sinks, self.default_context)))
    }

    /// Build the non-blocking front-end instead. Requires a Tokio runtime at
    /// call time for the offloaded operations.
    #[cfg(feature = "async")]
    pub fn build_async(self) -> crate::core::async_logger::AsyncLogger {
        crate::core::async_logger::AsyncLogger::from_core(Arc::new(LoggerCore::new(
            self.sinks,
            self.default_context,
        )))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::MultilogError;
    use crate::core::sink::SinkOptions;
    use crate::sinks::MemorySink;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingSink {
        options: SinkOptions,
        closes: Arc<AtomicUsize>,
    }

    impl FailingSink {
        fn new() -> Self {
            Self {
                options: SinkOptions::default(),
                closes: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl Sink for FailingSink {
        fn options(&self) -> &SinkOptions {
            &self.options
        }

        fn options_mut(&mut self) -> &mut SinkOptions {
            &mut self.options
        }

        fn write(&mut self, _payload: &LogPayload) -> Result<()> {
            Err(MultilogError::Io(std::io::Error::other("always fails")))
        }

        fn close(&mut self) -> Result<()> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            Err(MultilogError::Io(std::io::Error::other("close fails too")))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_payload_reaches_sink() {
        let sink = MemorySink::new();
        let buffer = sink.buffer();
        let logger = Logger::builder().sink(sink).build();

        logger.log(LogLevel::Info, "hello");

        let payloads = buffer.payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].message(), "hello");
        assert_eq!(payloads[0].level().unwrap(), LogLevel::Info);
    }

    #[test]
    fn test_context_precedence_content_over_default_over_sink() {
        let sink = MemorySink::new().with_context(Context::new().with("a", 1));
        let buffer = sink.buffer();
        let logger = Logger::builder()
            .sink(sink)
            .default_context(Context::new().with("a", 2).with("b", 2))
            .build();

        logger.log_with_context(LogLevel::Info, "m", Context::new().with("a", 3));

        let payloads = buffer.payloads();
        assert_eq!(payloads[0].get("a"), Some(&Value::from(3)));
        assert_eq!(payloads[0].get("b"), Some(&Value::from(2)));
    }

    #[test]
    fn test_failing_sink_does_not_block_later_sinks() {
        let memory = MemorySink::new();
        let buffer = memory.buffer();
        let logger = Logger::builder().sink(FailingSink::new()).sink(memory).build();

        logger.log(LogLevel::Info, "survives");

        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.payloads()[0].message(), "survives");
    }

    #[test]
    fn test_panicking_sink_is_contained() {
        struct PanickingSink {
            options: SinkOptions,
        }

        impl Sink for PanickingSink {
            fn options(&self) -> &SinkOptions {
                &self.options
            }

            fn options_mut(&mut self) -> &mut SinkOptions {
                &mut self.options
            }

            fn write(&mut self, _payload: &LogPayload) -> Result<()> {
                panic!("sink blew up");
            }

            fn name(&self) -> &'static str {
                "panicking"
            }
        }

        let memory = MemorySink::new();
        let buffer = memory.buffer();
        let logger = Logger::builder()
            .sink(PanickingSink {
                options: SinkOptions::default(),
            })
            .sink(memory)
            .build();

        logger.log(LogLevel::Info, "still delivered");

        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.payloads()[0].message(), "still delivered");
    }

    #[test]
    fn test_level_filtering_end_to_end() {
        let sink = MemorySink::new().with_levels(LogLevel::range(LogLevel::Info..));
        let buffer = sink.buffer();
        let logger = Logger::builder().sink(sink).build();

        logger.log(LogLevel::Trace, "m1");
        logger.log(LogLevel::Info, "m2");

        let payloads = buffer.payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].message(), "m2");
    }

    #[test]
    fn test_update_and_remove_context_reflected_in_payloads() {
        let sink = MemorySink::new();
        let buffer = sink.buffer();
        let logger = Logger::builder().sink(sink).build();

        logger.update_context(Context::new().with("service", "auth").with("env", "dev"));
        logger.log(LogLevel::Info, "first");

        logger.remove_context(["service"]).unwrap();
        logger.log(LogLevel::Info, "second");

        logger.clear_context();
        logger.log(LogLevel::Info, "third");

        let payloads = buffer.payloads();
        assert_eq!(payloads[0].get("service"), Some(&Value::from("auth")));
        assert_eq!(payloads[1].get("service"), None);
        assert_eq!(payloads[1].get("env"), Some(&Value::from("dev")));
        assert_eq!(payloads[2].get("env"), None);
    }

    #[test]
    fn test_remove_context_missing_key_is_atomic() {
        let sink = MemorySink::new();
        let buffer = sink.buffer();
        let logger = Logger::builder().sink(sink).build();
        logger.update_context(Context::new().with("x", 1).with("y", 2));

        let err = logger.remove_context(["x", "missing"]).unwrap_err();
        assert!(matches!(err, MultilogError::ContextKeys(keys) if keys == ["missing"]));

        logger.log(LogLevel::Info, "still intact");
        let payloads = buffer.payloads();
        assert_eq!(payloads[0].get("x"), Some(&Value::from(1)));
        assert_eq!(payloads[0].get("y"), Some(&Value::from(2)));
    }

    #[test]
    fn test_log_endpoint_shape() {
        let sink = MemorySink::new();
        let buffer = sink.buffer();
        let logger = Logger::builder().sink(sink).build();

        logger.log_endpoint(
            "create_user",
            "POST",
            "/users",
            json!({"content-type": "application/json"}),
            Some(json!({"dry_run": "true"})),
            Some(json!({"name": "ada"})),
            Some(Context::new().with("tenant", "acme")),
        );

        let payloads = buffer.payloads();
        let payload = &payloads[0];
        assert_eq!(payload.message(), "Endpoint Invoked: create_user");
        assert_eq!(payload.level().unwrap(), LogLevel::Info);
        assert_eq!(payload.get("event_source"), Some(&Value::from("http_endpoint")));
        assert_eq!(
            payload.get("event_type"),
            Some(&Value::from("endpoint_invocation"))
        );
        assert_eq!(payload.get("tenant"), Some(&Value::from("acme")));

        let request = payload.get("request").unwrap();
        assert_eq!(request["method"], Value::from("POST"));
        assert_eq!(request["path"], Value::from("/users"));
        assert_eq!(request["query"]["dry_run"], Value::from("true"));
        assert_eq!(request["body"]["name"], Value::from("ada"));
    }

    #[test]
    fn test_log_endpoint_defaults_empty_query_and_null_body() {
        let sink = MemorySink::new();
        let buffer = sink.buffer();
        let logger = Logger::builder().sink(sink).build();

        logger.log_endpoint("ping", "GET", "/ping", json!({}), None, None, None);

        let payloads = buffer.payloads();
        let request = payloads[0].get("request").unwrap();
        assert_eq!(request["query"], json!({}));
        assert_eq!(request["body"], Value::Null);
    }

    #[test]
    fn test_log_exception_captures_cause_chain() {
        let sink = MemorySink::new();
        let buffer = sink.buffer();
        let logger = Logger::builder().sink(sink).build();

        let root = std::io::Error::other("connection reset");
        let err = MultilogError::sink("betterstack", root);
        logger.log_exception("delivery failed", &err, None);

        let payloads = buffer.payloads();
        let payload = &payloads[0];
        assert_eq!(payload.level().unwrap(), LogLevel::Error);
        assert_eq!(payload.get("event_type"), Some(&Value::from("exception")));
        assert!(payload
            .get("exception_type")
            .and_then(Value::as_str)
            .unwrap()
            .contains("MultilogError"));

        let frames = payload.get("traceback").unwrap().as_array().unwrap();
        assert_eq!(frames.len(), 2);
        assert!(frames[1].as_str().unwrap().contains("connection reset"));
    }

    #[test]
    fn test_caller_location_is_recorded() {
        let sink = MemorySink::new();
        let buffer = sink.buffer();
        let logger = Logger::builder().sink(sink).build();

        logger.log(LogLevel::Info, "here");

        let payloads = buffer.payloads();
        let file = payloads[0].get("caller_file").and_then(Value::as_str).unwrap();
        assert!(file.ends_with("logger.rs"), "{file}");
        assert!(payloads[0].get("caller_line").and_then(Value::as_u64).unwrap() > 0);
    }

    #[test]
    fn test_close_reaches_every_sink_despite_failures() {
        let first = FailingSink::new();
        let first_closes = Arc::clone(&first.closes);
        let second = FailingSink::new();
        let second_closes = Arc::clone(&second.closes);

        let logger = Logger::builder().sink(first).sink(second).build();
        logger.close();

        assert_eq!(first_closes.load(Ordering::SeqCst), 1);
        assert_eq!(second_closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_closes_sinks() {
        let sink = FailingSink::new();
        let closes = Arc::clone(&sink.closes);
        {
            let logger = Logger::builder().sink(sink).build();
            logger.log(LogLevel::Info, "m");
        }
        assert!(closes.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_every_sink_receives_its_own_merge() {
        let first = MemorySink::new().with_context(Context::new().with("sink", "first"));
        let second = MemorySink::new().with_context(Context::new().with("sink", "second"));
        let first_buffer = first.buffer();
        let second_buffer = second.buffer();

        let logger = Logger::builder().sink(first).sink(second).build();
        logger.log(LogLevel::Info, "m");

        assert_eq!(
            first_buffer.payloads()[0].get("sink"),
            Some(&Value::from("first"))
        );
        assert_eq!(
            second_buffer.payloads()[0].get("sink"),
            Some(&Value::from("second"))
        );
    }
}
