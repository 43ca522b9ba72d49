//! # multilog
//!
//! A multi-destination structured logging facade: emit a message with a
//! severity level and optional metadata, and fan it out to a configurable
//! set of sinks (console, JSONL file, remote HTTP ingest), each
//! independently filterable by severity and each able to attach its own
//! default context.
//!
//! ## Features
//!
//! - **Six ordered severities** with backward-compatible aliases (`warn`,
//!   `fatal`) and range queries over the canonical set
//! - **Isolated dispatch**: one failing sink never blocks the others and
//!   never reaches the caller
//! - **Layered context**: sink context < logger default context < call-site
//!   content, last write winning
//! - **Async front-end** (feature `async`) that offloads dispatch without
//!   changing its semantics
//!
//! ## Example
//!
//! ```
//! use multilog::{Context, Logger, LogLevel};
//! use multilog::sinks::ConsoleSink;
//!
//! let logger = Logger::builder()
//!     .sink(ConsoleSink::new().with_levels(LogLevel::range(LogLevel::Info..)))
//!     .default_context(Context::new().with("service", "api"))
//!     .build();
//!
//! logger.info("server started");
//! logger.log_with_context(LogLevel::Warning, "slow request", Context::new().with("ms", 812));
//! logger.close();
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Config, Context, LogLevel, LogPayload, Logger, LoggerBuilder, MultilogError, Result,
        SharedContext, Sink, SinkOptions,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};

    #[cfg(feature = "betterstack")]
    pub use crate::sinks::BetterstackSink;

    #[cfg(feature = "async")]
    pub use crate::core::AsyncLogger;
}

pub use crate::core::{
    Config, Context, LogLevel, LogPayload, Logger, LoggerBuilder, MultilogError, Result,
    SharedContext, Sink, SinkOptions,
};

#[cfg(feature = "async")]
pub use crate::core::AsyncLogger;
