//! Betterstack remote ingestion example
//!
//! Builds a logger from the environment: set BETTERSTACK_TOKEN and
//! BETTERSTACK_INGEST_URL, or run without them for console-only output.
//! Setting exactly one of the pair is a configuration error.
//!
//! Run with: cargo run --example betterstack

use multilog::prelude::*;

fn main() {
    println!("=== multilog - Betterstack Example ===\n");

    let logger = match Logger::from_env() {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    logger.info("hello from multilog");
    logger.log_with_context(
        LogLevel::Error,
        "payment declined",
        Context::new().with("order_id", "o-1337").with("amount", 49.99),
    );

    logger.close();
    println!("done; entries were shipped if the environment pair was set");
}
