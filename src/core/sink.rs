//! Sink trait and shared per-sink options

use crate::core::context::Context;
use crate::core::error::{MultilogError, Result};
use crate::core::level::LogLevel;
use crate::core::payload::LogPayload;

/// State every sink carries: its own context overlay and the set of levels
/// it accepts. Defaults to no context and all six canonical levels.
#[derive(Debug, Clone)]
pub struct SinkOptions {
    context: Context,
    levels: Vec<LogLevel>,
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            context: Context::new(),
            levels: LogLevel::all().to_vec(),
        }
    }
}

impl SinkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn with_levels(mut self, levels: impl IntoIterator<Item = LogLevel>) -> Self {
        self.levels = levels.into_iter().collect();
        self
    }

    /// Membership check on the accepted set. Aliases cannot reach this
    /// point: every `LogLevel` value is canonical by construction.
    pub fn accepts(&self, level: LogLevel) -> bool {
        self.levels.contains(&level)
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn levels(&self) -> &[LogLevel] {
        &self.levels
    }

    /// Overwrite-merge into this sink's context overlay.
    pub fn update_context(&mut self, context: &Context) {
        self.context.update(context);
    }

    /// Remove keys from this sink's context, atomic-or-nothing.
    pub fn remove_context<I, S>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context.remove(keys)
    }

    pub fn clear_context(&mut self) {
        self.context.clear();
    }
}

/// An output destination for log payloads.
///
/// Implementors provide [`write`](Sink::write) (destination-specific
/// emission with the sink context already merged) plus access to their
/// [`SinkOptions`]; filtering and context merging are shared behavior and
/// identical across all sinks.
pub trait Sink: Send + Sync {
    fn options(&self) -> &SinkOptions;

    fn options_mut(&mut self) -> &mut SinkOptions;

    /// Materialize one payload at the destination.
    ///
    /// Invoked through [`send`](Sink::send); the payload already carries
    /// this sink's context overlay.
    fn write(&mut self, payload: &LogPayload) -> Result<()>;

    /// Diagnostic identifier for failure reporting.
    fn name(&self) -> &'static str;

    fn accepts(&self, level: LogLevel) -> bool {
        self.options().accepts(level)
    }

    /// A fresh payload equal to this sink's context overlaid by `payload`
    /// (payload keys win). Mutates neither input.
    fn merge_context(&self, payload: &LogPayload) -> LogPayload {
        payload.merged_over(self.options().context())
    }

    /// Merge the sink context and emit. Any failure comes back as
    /// [`MultilogError::Sink`] wrapping the cause; no lower-level error
    /// escapes raw.
    fn send(&mut self, payload: &LogPayload) -> Result<()> {
        let merged = self.merge_context(payload);
        let name = self.name();
        self.write(&merged)
            .map_err(|source| MultilogError::sink(name, source))
    }

    /// Release held resources. Idempotent, and safe to call on a sink that
    /// was never used.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
