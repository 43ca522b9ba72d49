//! Sink implementations

pub mod console;
pub mod file;
pub mod memory;

#[cfg(feature = "betterstack")]
pub mod betterstack;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use memory::{MemoryBuffer, MemorySink};

#[cfg(feature = "betterstack")]
pub use betterstack::BetterstackSink;

// Re-export the trait so sink implementors need only this module.
pub use crate::core::sink::{Sink, SinkOptions};
