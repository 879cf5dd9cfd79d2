//! Report → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): aligned `name: value` lines
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use serde::Serialize;

use crate::ops::{FileStats, PackSummary, ScanReport};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Format an error.
pub fn format_error(err: &anyhow::Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(&serde_json::json!({
            "error": format!("{:#}", err)
        })),
        OutputMode::Human => format!("(error) {:#}", err),
    }
}

/// Format the result of `pack`.
pub fn format_pack(summary: &PackSummary, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(summary),
        OutputMode::Human => format!(
            "wrote {} records, {} bytes ({} magic collisions)",
            summary.records, summary.bytes_written, summary.magic_collisions
        ),
    }
}

/// Format the result of `stat`.
pub fn format_stats(stats: &FileStats, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(stats),
        OutputMode::Human => [
            ("records", stats.records),
            ("chunks", stats.chunks),
            ("split records", stats.split_records),
            ("magic collisions", stats.magic_collisions),
            ("empty records", stats.empty_records),
            ("payload bytes", stats.payload_bytes),
            ("largest record", stats.largest_record),
            ("file bytes", stats.file_bytes),
        ]
        .iter()
        .map(|(name, value)| format!("{:<18}{}", format!("{}:", name), value))
        .collect::<Vec<_>>()
        .join("\n"),
    }
}

/// Format the result of `scan`.
pub fn format_scan(report: &ScanReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(report),
        OutputMode::Human => {
            let mut lines: Vec<String> = report
                .records
                .iter()
                .map(|entry| format!("{:>10}  {}", entry.offset, entry.len))
                .collect();
            lines.push(format!(
                "recovered {} records, skipped {} bytes in {} corrupt regions",
                report.records.len(),
                report.skipped_bytes,
                report.corrupt_regions
            ));
            lines.join("\n")
        }
    }
}
