//! Print the tags of one or more audio files
//!
//! Run with:
//! ```bash
//! cargo run -p core-metadata --example dump_tags -- song.wma track.flac
//!
//! # JSON output and decoder debug logs
//! cargo run -p core-metadata --example dump_tags -- --json --debug song.mp3
//! ```

use anyhow::Context;
use core_metadata::TagReader;
use core_runtime::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
use std::env;

const CANONICAL_KEYS: [&str; 6] = ["TITLE", "ARTIST", "ALBUM", "YEAR", "GENRE", "TRACKNUMBER"];

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let debug = args.iter().any(|a| a == "--debug");

    let level = if debug { LogLevel::Debug } else { LogLevel::Warn };
    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(level),
    )?;

    let reader = TagReader::new();
    for path in args.iter().filter(|a| !a.starts_with("--")) {
        let report = reader
            .read_path(path)
            .with_context(|| format!("Failed to read {path}"))?;

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            continue;
        }

        println!("== {path} [{}]", report.version_name());
        for line in &report.lines {
            println!("{line}");
        }
        for key in CANONICAL_KEYS {
            println!("{key:>12}: {}", report.get(key));
        }
        if let Some(err) = &report.failure {
            println!("   (stopped early: {err})");
        }
    }
    Ok(())
}
