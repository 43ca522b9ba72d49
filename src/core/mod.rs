//! Core logger types and traits

pub mod config;
pub mod context;
pub mod error;
pub mod level;
pub mod logger;
pub mod payload;
pub mod sink;

#[cfg(feature = "async")]
pub mod async_logger;

pub use config::Config;
pub use context::{Context, SharedContext};
pub use error::{MultilogError, Result};
pub use level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use payload::LogPayload;
pub use sink::{Sink, SinkOptions};

#[cfg(feature = "async")]
pub use async_logger::AsyncLogger;
