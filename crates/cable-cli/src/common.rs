//! Output formats and writers shared across commands.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tabwriter::TabWriter;

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable aligned table (default for interactive use)
    #[default]
    Table,
    /// JSON document (pipe-friendly, structured)
    Json,
    /// Comma-separated values (pipe to awk/cut/etc)
    Csv,
}

impl OutputFormat {
    /// Parse a format name as written in the config file.
    pub fn from_config(name: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(name, true)
            .map_err(|_| anyhow::anyhow!("unknown output format '{name}' (expected table, json or csv)"))
    }
}

/// Destination for command output: a file when given, stdout otherwise.
pub fn open_output(out: Option<&Path>) -> Result<Box<dyn Write>> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating directory '{}'", parent.display()))?;
            }
            let file = fs::File::create(path)
                .with_context(|| format!("creating output file '{}'", path.display()))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

/// Write data as JSON to the given writer.
pub fn write_json<W: Write, T: Serialize>(
    data: &T,
    writer: &mut W,
    pretty: bool,
) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, data).map_err(io::Error::other)?;
    } else {
        serde_json::to_writer(&mut *writer, data).map_err(io::Error::other)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Write JSON array data as CSV to the given writer.
/// Assumes all objects have the same keys.
pub fn write_csv_from_json<W: Write>(data: &[serde_json::Value], writer: &mut W) -> io::Result<()> {
    let Some(first) = data.first() else {
        return Ok(());
    };

    let headers: Vec<&str> = match first.as_object() {
        Some(obj) => obj.keys().map(|s| s.as_str()).collect(),
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Expected JSON objects",
            ))
        }
    };

    writeln!(writer, "{}", headers.join(","))?;

    for item in data {
        if let Some(obj) = item.as_object() {
            let values: Vec<String> = headers
                .iter()
                .map(|h| obj.get(*h).map(csv_field).unwrap_or_default())
                .collect();
            writeln!(writer, "{}", values.join(","))?;
        }
    }
    Ok(())
}

fn csv_field(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => {
            if s.contains(',') || s.contains('"') {
                format!("\"{}\"", s.replace('"', "\"\""))
            } else {
                s.clone()
            }
        }
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A labelled value in a summary listing. Section headings have no value.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: String,
    pub value: Option<String>,
}

impl SummaryRow {
    pub fn section(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
        }
    }

    pub fn value(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
        }
    }
}

/// Write summary rows as an aligned two-column listing.
pub fn write_summary_table<W: Write>(rows: &[SummaryRow], writer: W) -> io::Result<()> {
    let mut tw = TabWriter::new(writer).padding(2);
    for row in rows {
        match &row.value {
            None => writeln!(tw, "{}", row.label)?,
            Some(value) => writeln!(tw, "  {}\t{}", row.label, value)?,
        }
    }
    tw.flush()
}

/// Write summary rows as `section,quantity,value` CSV.
pub fn write_summary_csv<W: Write>(rows: &[SummaryRow], writer: &mut W) -> io::Result<()> {
    let records: Vec<serde_json::Value> = rows
        .iter()
        .scan(String::new(), |section, row| {
            Some(match &row.value {
                None => {
                    *section = row.label.clone();
                    None
                }
                Some(value) => Some(serde_json::json!({
                    "section": section.clone(),
                    "quantity": row.label,
                    "value": value,
                })),
            })
        })
        .flatten()
        .collect();
    write_csv_from_json(&records, writer)
}
