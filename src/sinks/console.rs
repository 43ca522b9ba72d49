//! Console sink

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde_json::Value;
use std::io::Write;

use crate::core::context::Context;
use crate::core::error::Result;
use crate::core::level::LogLevel;
use crate::core::payload::LogPayload;
use crate::core::sink::{Sink, SinkOptions};

/// Sink for logging to the console as plain text.
///
/// Format: `timestamp  LEVEL     message  {context}`
///
/// Entries at `Warning` and above go to stderr, everything else to stdout.
/// The routing decision uses the payload's resolved level, so alias tokens
/// arriving through payload mutation route correctly.
pub struct ConsoleSink {
    options: SinkOptions,
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            options: SinkOptions::default(),
            use_colors: true,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            options: SinkOptions::default(),
            use_colors,
        }
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

    fn format_line(&self, payload: &LogPayload, level: LogLevel) -> String {
        let timestamp = format_timestamp_ms(payload.timestamp_ms());

        // Pad before coloring so ANSI escapes do not skew the column.
        let level_text = format!("{:<8}", level.to_str().to_uppercase());
        let level_text = if self.use_colors {
            level_text.color(level.color_code()).to_string()
        } else {
            level_text
        };

        let mut line = format!("{}  {}  {}", timestamp, level_text, payload.message());

        let context = payload.context_fields();
        if !context.is_empty() {
            line.push_str("  ");
            line.push_str(&Value::Object(context).to_string());
        }
        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn options(&self) -> &SinkOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut SinkOptions {
        &mut self.options
    }

    fn write(&mut self, payload: &LogPayload) -> Result<()> {
        let level = payload.level()?;
        let line = self.format_line(payload, level);

        match level {
            LogLevel::Warning | LogLevel::Error | LogLevel::Critical => eprintln!("{line}"),
            _ => println!("{line}"),
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        // Both streams are written to, flush both.
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

/// Render epoch milliseconds as `YYYY-MM-DD HH:MM:SS.mmm` (UTC, 23 chars).
fn format_timestamp_ms(timestamp_ms: i64) -> String {
    let datetime = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}
