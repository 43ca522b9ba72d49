//! File sink

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::core::context::Context;
use crate::core::error::{MultilogError, Result};
use crate::core::level::LogLevel;
use crate::core::payload::LogPayload;
use crate::core::sink::{Sink, SinkOptions};

/// Sink for logging to a file in JSON Lines format.
///
/// The file handle is opened lazily on the first write (creating parent
/// directories as needed) and released on [`close`](Sink::close). By default
/// entries are appended; `with_append(false)` truncates the file when the
/// handle is opened instead.
pub struct FileSink {
    options: SinkOptions,
    path: PathBuf,
    append: bool,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            options: SinkOptions::default(),
            path: path.into(),
            append: true,
            writer: None,
        }
    }

    /// Append to an existing file (default) or overwrite it on open.
    #[must_use]
    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Set this sink's own context overlay.
    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.options = std::mem::take(&mut self.options).with_context(context);
        self
    }

    /// Restrict the levels this sink emits.
    #[must_use]
    pub fn with_levels(mut self, levels: impl IntoIterator<Item = LogLevel>) -> Self {
        self.options = std::mem::take(&mut self.options).with_levels(levels);
        self
    }

    fn open_file(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = if self.append {
            OpenOptions::new().create(true).append(true).open(&self.path)?
        } else {
            File::create(&self.path)?
        };
        Ok(file)
    }
}

impl Sink for FileSink {
    fn options(&self) -> &SinkOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut SinkOptions {
        &mut self.options
    }

    fn write(&mut self, payload: &LogPayload) -> Result<()> {
        if self.writer.is_none() {
            self.writer = Some(BufWriter::new(self.open_file()?));
        }
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| MultilogError::Io(std::io::Error::other("file writer not open")))?;

        let line = payload.to_json()?;
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
