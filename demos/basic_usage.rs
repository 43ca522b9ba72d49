//! Basic logger usage example
//!
//! Demonstrates synchronous logging to the console with layered context.
//!
//! Run with: cargo run --example basic_usage

use multilog::prelude::*;

fn main() {
    println!("=== multilog - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .sink(ConsoleSink::new())
        .default_context(Context::new().with("service", "demo").with("version", "0.1.0"))
        .build();

    println!("1. Logging at different levels (warning and above go to stderr):");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.critical("This is a critical message");

    println!("\n2. Call-site content overrides the default context:");
    logger.log_with_context(
        LogLevel::Info,
        "request handled",
        Context::new().with("service", "overridden").with("status", 200),
    );

    println!("\n3. Mutating the default context:");
    logger.update_context(Context::new().with("request_id", "r-42"));
    logger.info("tagged with request_id");
    logger.remove_context(["request_id"]).expect("key exists");
    logger.info("request_id removed again");

    println!("\n4. Structured conveniences:");
    logger.log_endpoint(
        "create_user",
        "POST",
        "/users",
        serde_json::json!({"content-type": "application/json"}),
        None,
        Some(serde_json::json!({"name": "ada"})),
        None,
    );

    let err = std::io::Error::other("downstream unavailable");
    logger.log_exception("user creation failed", &err, None);

    logger.close();
    println!("\n=== Example completed ===");
}
