//! CLI command implementations
//!
//! All commands are read-only: they stream a record file through the
//! reader and report what they find. Corruption halts the stream
//! immediately per FORMAT.md §4; the failure reaches stderr as a log
//! event and the process exits non-zero.

use std::path::Path;

use serde_json::json;

use crate::observability::Logger;
use crate::record::{RecordReader, FRAME_OVERHEAD};

use super::args::Command;
use super::errors::CliResult;

/// Dispatch a parsed command.
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Verify { file } => verify(&file),
        Command::Count { file } => count(&file),
        Command::Stats { file } => stats(&file),
    }
}

/// Streams the whole file, halting on the first corruption.
///
/// On success prints a JSON summary to stdout. On failure the record
/// error (with its code and frame offset) propagates to the caller
/// after an ERROR log event.
pub fn verify(path: &Path) -> CliResult<()> {
    let file = path.display().to_string();
    Logger::info("VERIFY_START", &[("file", file.as_str())]);

    let mut reader = RecordReader::open(path)?;
    let mut payload_bytes: u64 = 0;

    loop {
        match reader.read_next() {
            Ok(Some(payload)) => payload_bytes += payload.len() as u64,
            Ok(None) => break,
            Err(e) => {
                let records_read = reader.records_read().to_string();
                Logger::error(
                    "VERIFY_FAILED",
                    &[
                        ("code", e.kind().code()),
                        ("file", file.as_str()),
                        ("records_read", records_read.as_str()),
                    ],
                );
                return Err(e.into());
            }
        }
    }

    let records = reader.records_read().to_string();
    Logger::info(
        "VERIFY_COMPLETE",
        &[("file", file.as_str()), ("records", records.as_str())],
    );

    let summary = json!({
        "file": path.display().to_string(),
        "records": reader.records_read(),
        "payload_bytes": payload_bytes,
        "total_bytes": reader.current_offset(),
    });
    println!("{}", summary);
    Ok(())
}

/// Prints the number of records in the file.
pub fn count(path: &Path) -> CliResult<()> {
    let mut reader = RecordReader::open(path)?;
    while reader.read_next()?.is_some() {}
    println!("{}", reader.records_read());
    Ok(())
}

/// Prints record count and payload size statistics as JSON.
pub fn stats(path: &Path) -> CliResult<()> {
    let mut reader = RecordReader::open(path)?;

    let mut records: u64 = 0;
    let mut payload_bytes: u64 = 0;
    let mut min_payload: Option<u64> = None;
    let mut max_payload: u64 = 0;

    while let Some(payload) = reader.read_next()? {
        let len = payload.len() as u64;
        records += 1;
        payload_bytes += len;
        min_payload = Some(min_payload.map_or(len, |m| m.min(len)));
        max_payload = max_payload.max(len);
    }

    let summary = json!({
        "file": path.display().to_string(),
        "records": records,
        "payload_bytes": payload_bytes,
        "frame_overhead_bytes": records * FRAME_OVERHEAD as u64,
        "min_payload_bytes": min_payload.unwrap_or(0),
        "max_payload_bytes": max_payload,
        "mean_payload_bytes": if records > 0 { payload_bytes / records } else { 0 },
    });
    println!("{}", summary);
    Ok(())
}
