//! Context overlays merged into log payloads
//!
//! This module provides:
//! - `Context`: a plain key/value overlay owned by a call site or a sink
//! - `SharedContext`: the logger-owned overlay, safe to mutate while logging

use crate::core::error::{MultilogError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Key/value fields merged into log payloads.
///
/// Values are arbitrary JSON; anything convertible into a
/// [`serde_json::Value`] can be stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    fields: Map<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Add a field, consuming and returning the context (builder form).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Insert or overwrite a single field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Merge `other` into this context, overwriting on key conflicts.
    pub fn update(&mut self, other: &Context) {
        for (key, value) in &other.fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Remove the named keys.
    ///
    /// All keys are validated before anything is removed: if any key is
    /// absent the call fails with [`MultilogError::ContextKeys`] listing
    /// every missing key, and the context is left untouched.
    pub fn remove<I, S>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let missing: Vec<String> = keys
            .iter()
            .filter(|key| !self.fields.contains_key(key.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(MultilogError::ContextKeys(missing));
        }
        for key in &keys {
            self.fields.remove(key);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.fields.clone()))
    }
}

impl FromIterator<(String, Value)> for Context {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Logger-owned context overlay, merged into every payload.
///
/// Clones share the same underlying fields, so the synchronous and
/// asynchronous front-ends of one logger observe the same mutations.
#[derive(Debug, Clone, Default)]
pub struct SharedContext {
    inner: Arc<RwLock<Context>>,
}

impl SharedContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_context(context: Context) -> Self {
        Self {
            inner: Arc::new(RwLock::new(context)),
        }
    }

    /// Overwrite-merge `context` into the overlay.
    pub fn update(&self, context: &Context) {
        self.inner.write().update(context);
    }

    /// Insert or overwrite a single field.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.inner.write().insert(key, value);
    }

    /// Remove keys, atomic-or-nothing. See [`Context::remove`].
    pub fn remove<I, S>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.write().remove(keys)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Clone of the current fields, decoupled from later mutation.
    pub fn snapshot(&self) -> Context {
        self.inner.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }
}
