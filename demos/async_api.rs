//! Async logging example
//!
//! Demonstrates the non-blocking front-end: logging operations return
//! futures while context mutation stays synchronous.
//!
//! Run with: cargo run --example async_api

use multilog::prelude::*;

#[tokio::main]
async fn main() {
    println!("=== multilog - Async API Example ===\n");

    let logger = Logger::builder()
        .sink(ConsoleSink::new())
        .default_context(Context::new().with("service", "async-demo"))
        .build_async();

    println!("1. Awaiting individual log calls:");
    logger.log(LogLevel::Info, "event loop stays unblocked").await;

    println!("\n2. Context mutation is synchronous and immediately visible:");
    logger.update_context(Context::new().with("request_id", "r-1"));
    logger.log(LogLevel::Info, "tagged").await;
    logger.clear_context();

    println!("\n3. Concurrent log calls from multiple tasks:");
    let logger = std::sync::Arc::new(logger);
    let mut handles = Vec::new();
    for task_id in 0..4 {
        let logger = std::sync::Arc::clone(&logger);
        handles.push(tokio::spawn(async move {
            for i in 0..3 {
                logger
                    .log(LogLevel::Info, format!("task {task_id} - message {i}"))
                    .await;
            }
        }));
    }
    for handle in handles {
        handle.await.expect("task completed");
    }

    logger.close().await;
    println!("\n=== Example completed ===");
}
