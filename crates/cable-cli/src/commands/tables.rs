use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Result};
use cable_core::{CableType, Construction};
use cable_io::validate_tables;
use tabwriter::TabWriter;
use tracing::info;

use cable_cli::config::CableConfig;
use cable_cli::inputs::load_tables;

pub fn handle_validate(tables: Option<&Path>, config: &CableConfig) -> Result<()> {
    let (tables, source) = load_tables(tables, config)?;
    let diag = validate_tables(&tables);
    info!(tables = %source, "validated tables: {}", diag.summary());

    if diag.has_issues() {
        print!("{diag}");
    } else {
        println!("{source}: no issues");
    }
    if diag.has_errors() {
        bail!("table validation failed for {source}: {}", diag.summary());
    }
    Ok(())
}

pub fn handle_list(tables: Option<&Path>, config: &CableConfig) -> Result<()> {
    let (tables, source) = load_tables(tables, config)?;
    info!(tables = %source, "listing tables");

    let mut tw = TabWriter::new(io::stdout());
    writeln!(tw, "CABLE TYPE\tVOLTAGE\tINSTALLATIONS")?;
    for cable_type in CableType::ALL {
        for voltage in tables.voltage_classes(*cable_type) {
            let installations: Vec<&str> = tables
                .installations(*cable_type, voltage)
                .iter()
                .map(|i| i.as_str())
                .collect();
            writeln!(tw, "{}\t{}\t{}", cable_type, voltage, installations.join(", "))?;
        }
    }
    tw.flush()?;

    println!();
    for construction in Construction::ALL {
        let sizes = match tables.sizes(*construction) {
            Ok(sizes) => sizes
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            Err(_) => "(none)".to_string(),
        };
        println!("{construction} sizes (mm²): {sizes}");
    }
    Ok(())
}
