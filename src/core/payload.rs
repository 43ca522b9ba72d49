//! Log payload construction
//!
//! A payload is the flat JSON document a sink ultimately materializes. It
//! always starts from three base fields (`timestamp_ms`, `message`, `level`)
//! and accumulates context overlays on top, last write winning.

use crate::core::context::Context;
use crate::core::error::{MultilogError, Result};
use crate::core::level::LogLevel;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const KEY_TIMESTAMP_MS: &str = "timestamp_ms";
pub const KEY_MESSAGE: &str = "message";
pub const KEY_LEVEL: &str = "level";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogPayload {
    fields: Map<String, Value>,
}

impl LogPayload {
    /// Create a payload with the base fields, stamped with the current time.
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(
            KEY_TIMESTAMP_MS.to_string(),
            Value::from(Utc::now().timestamp_millis()),
        );
        fields.insert(KEY_MESSAGE.to_string(), Value::from(message.into()));
        fields.insert(KEY_LEVEL.to_string(), Value::from(level.to_str()));
        Self { fields }
    }

    /// Merge `context` into the payload, overwriting on conflict.
    ///
    /// Applied in source-precedence order by the logger core: default
    /// context first, then call-site content, so later overlays win even
    /// over the base fields.
    pub fn overlay(&mut self, context: &Context) {
        for (key, value) in context.iter() {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// A new payload equal to `base` overlaid by this payload.
    ///
    /// Payload keys win on conflict; neither input is mutated. This is the
    /// sink-side merge: the sink's own context forms the base layer.
    pub fn merged_over(&self, base: &Context) -> LogPayload {
        if base.is_empty() {
            return self.clone();
        }
        let mut fields: Map<String, Value> = base
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        for (key, value) in &self.fields {
            fields.insert(key.clone(), value.clone());
        }
        LogPayload { fields }
    }

    /// Resolve the payload's severity.
    ///
    /// A missing `level` field resolves to `Info`; a present but
    /// unparseable one is an error for the sink processing this payload.
    pub fn level(&self) -> Result<LogLevel> {
        match self.fields.get(KEY_LEVEL) {
            None => Ok(LogLevel::default()),
            Some(value) => match value.as_str() {
                Some(token) => token.parse(),
                None => Err(MultilogError::UnknownLevel(value.to_string())),
            },
        }
    }

    pub fn message(&self) -> &str {
        self.fields
            .get(KEY_MESSAGE)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.fields
            .get(KEY_TIMESTAMP_MS)
            .and_then(Value::as_i64)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Everything except the base fields, for rendering a context suffix.
    pub fn context_fields(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|(key, _)| {
                !matches!(key.as_str(), KEY_TIMESTAMP_MS | KEY_MESSAGE | KEY_LEVEL)
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Single-line JSON rendition, as written by the file sink.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }
}
