//! In-memory recording sink
//!
//! Records every accepted payload into a shared buffer. Intended for tests
//! and demos that need to assert on delivered entries.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::core::context::Context;
use crate::core::error::Result;
use crate::core::level::LogLevel;
use crate::core::payload::LogPayload;
use crate::core::sink::{Sink, SinkOptions};

/// Handle onto a [`MemorySink`]'s buffer, usable after the sink has been
/// moved into a logger.
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    entries: Arc<Mutex<Vec<LogPayload>>>,
}

impl MemoryBuffer {
    pub fn payloads(&self) -> Vec<LogPayload> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

/// Sink that keeps delivered payloads in memory.
///
/// # Example
///
/// ```
/// use multilog::{Logger, LogLevel};
/// use multilog::sinks::MemorySink;
///
/// let sink = MemorySink::new();
/// let buffer = sink.buffer();
/// let logger = Logger::builder().sink(sink).build();
///
/// logger.log(LogLevel::Info, "captured");
/// assert_eq!(buffer.payloads()[0].message(), "captured");
/// ```
#[derive(Default)]
pub struct MemorySink {
    options: SinkOptions,
    buffer: MemoryBuffer,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle onto the shared buffer; keep it before handing the sink to a
    /// logger.
    pub fn buffer(&self) -> MemoryBuffer {
        self.buffer.clone()
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

impl Sink for MemorySink {
    fn options(&self) -> &SinkOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut SinkOptions {
        &mut self.options
    }

    fn write(&mut self, payload: &LogPayload) -> Result<()> {
        self.buffer.entries.lock().push(payload.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
