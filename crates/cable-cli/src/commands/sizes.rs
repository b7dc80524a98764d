use std::io::{self, Write};

use anyhow::Result;
use cable_algo::RatingEngine;
use cable_core::SizeSweepRow;
use tabwriter::TabWriter;
use tracing::{info, warn};

use cable_cli::cli::CableArgs;
use cable_cli::common::{write_csv_from_json, write_json, OutputFormat};
use cable_cli::config::CableConfig;
use cable_cli::inputs::{build_parameters, load_tables};

pub fn handle(cable: &CableArgs, format: Option<OutputFormat>, config: &CableConfig) -> Result<()> {
    let (tables, source) = load_tables(cable.tables.as_deref(), config)?;
    let params = build_parameters(cable, config)?;
    let sweep = RatingEngine::new(&tables).sweep(&params)?;
    for issue in &sweep.diagnostics.issues {
        warn!("{issue}");
    }
    info!(rows = sweep.rows.len(), tables = %source, "size sweep complete");

    let format = match format {
        Some(format) => format,
        None => config.output_format()?,
    };
    let mut stdout = io::stdout();
    match format {
        OutputFormat::Json => write_json(&sweep, &mut stdout, true)?,
        OutputFormat::Csv => {
            let records = sweep
                .rows
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()?;
            write_csv_from_json(&records, &mut stdout)?;
        }
        OutputFormat::Table => {
            write_sweep_table(&sweep.rows, &mut stdout)?;
            if sweep.diagnostics.has_issues() {
                write!(stdout, "\n{}", sweep.diagnostics)?;
            }
        }
    }
    Ok(())
}

fn write_sweep_table<W: Write>(rows: &[SizeSweepRow], writer: W) -> io::Result<()> {
    let mut tw = TabWriter::new(writer);
    writeln!(tw, "SIZE (mm²)\tBASE (A)\tPER CIRCUIT (A)\tTOTAL (A)\tMEETS\tDROP (%)\t")?;
    for row in rows {
        let mut marks = Vec::new();
        if row.selected {
            marks.push("selected");
        }
        if row.recommended {
            marks.push("recommended");
        }
        let drop = row
            .voltage_drop_percent
            .map(|p| format!("{p:.2}"))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            tw,
            "{}\t{:.0}\t{:.0}\t{:.0}\t{}\t{}\t{}",
            row.size.value(),
            row.base_rating.value(),
            row.final_rating_per_circuit.value(),
            row.final_rating_total.value(),
            if row.meets_requirement { "yes" } else { "no" },
            drop,
            marks.join(", ")
        )?;
    }
    tw.flush()
}
