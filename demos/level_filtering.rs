//! Per-sink level filtering example
//!
//! Demonstrates range queries over the level set and independent per-sink
//! filters: the console shows everything, the file keeps warnings and above.
//!
//! Run with: cargo run --example level_filtering

use multilog::prelude::*;

fn main() {
    println!("=== multilog - Level Filtering Example ===\n");

    println!("Canonical levels: {:?}", LogLevel::all());
    println!(
        "Warning and above: {:?}",
        LogLevel::range(LogLevel::Warning..)
    );
    println!(
        "Aliases resolve to canonical members: 'warn' -> {}, 'fatal' -> {}\n",
        "warn".parse::<LogLevel>().unwrap(),
        "fatal".parse::<LogLevel>().unwrap(),
    );

    let logger = Logger::builder()
        .sink(ConsoleSink::new())
        .sink(
            FileSink::new("demo-logs/warnings.jsonl")
                .with_levels(LogLevel::range(LogLevel::Warning..)),
        )
        .build();

    logger.trace("console only");
    logger.debug("console only");
    logger.info("console only");
    logger.warning("console and file");
    logger.error("console and file");
    logger.critical("console and file");

    logger.close();
    println!("\nWarnings and above were also written to demo-logs/warnings.jsonl");
}
