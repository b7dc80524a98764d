use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use cable_algo::RatingEngine;
use cable_core::{CableParameters, CableRatingResult, ResistanceSource};
use chrono::Utc;
use tracing::{info, warn};

use cable_cli::cli::CableArgs;
use cable_cli::common::{
    open_output, write_json, write_summary_csv, write_summary_table, OutputFormat, SummaryRow,
};
use cable_cli::config::CableConfig;
use cable_cli::inputs::{build_parameters, load_tables};
use cable_cli::report::write_report;

pub fn handle(
    cable: &CableArgs,
    format: Option<OutputFormat>,
    report: bool,
    out: Option<&Path>,
    config: &CableConfig,
) -> Result<()> {
    let (tables, source) = load_tables(cable.tables.as_deref(), config)?;
    let params = build_parameters(cable, config)?;
    info!(
        material = %params.material,
        construction = %params.construction,
        voltage = %params.voltage_rating,
        size = params.conductor_size.value(),
        installation = %params.installation,
        tables = %source,
        "rating cable"
    );

    let result = RatingEngine::new(&tables).rate(&params)?;
    for issue in &result.diagnostics.issues {
        warn!("{issue}");
    }
    info!(
        final_rating_total = result.final_rating_total.value(),
        recommended = result.recommendation.recommended_size.value(),
        "rating complete"
    );

    let mut writer = open_output(out)?;
    if report {
        write_report(&params, &result, &source.to_string(), Utc::now(), &mut writer)
            .context("writing report")?;
    } else {
        let format = match format {
            Some(format) => format,
            None => config.output_format()?,
        };
        match format {
            OutputFormat::Json => {
                let doc = serde_json::json!({ "parameters": params, "result": result });
                write_json(&doc, &mut writer, true)?;
            }
            OutputFormat::Csv => write_summary_csv(&summary_rows(&params, &result), &mut writer)?,
            OutputFormat::Table => {
                write_summary_table(&summary_rows(&params, &result), &mut writer)?;
                if result.diagnostics.has_issues() {
                    write!(writer, "\n{}", result.diagnostics)?;
                }
            }
        }
    }
    writer.flush()?;

    if let Some(path) = out {
        info!("wrote output to {}", path.display());
    }
    Ok(())
}

fn summary_rows(params: &CableParameters, result: &CableRatingResult) -> Vec<SummaryRow> {
    let f = &result.derating;
    let rec = &result.recommendation;
    let sc = &result.short_circuit;
    let vd = &result.voltage_drop;
    let pl = &result.power_loss;

    let mut rows = vec![
        SummaryRow::section("Cable"),
        SummaryRow::value(
            "Type",
            format!("{} {}", params.material.label(), params.construction.label()),
        ),
        SummaryRow::value("Voltage class", params.voltage_rating.clone()),
        SummaryRow::value("Size", format!("{} mm²", params.conductor_size.value())),
        SummaryRow::value("Installation", params.installation.label()),
        SummaryRow::section("Derating"),
        SummaryRow::value("Temperature", format!("{:.2}", f.temperature)),
    ];
    if f.ground_factors_applicable {
        rows.push(SummaryRow::value("Depth", format!("{:.2}", f.depth)));
        rows.push(SummaryRow::value("Soil resistivity", format!("{:.2}", f.resistivity)));
    }
    rows.extend([
        SummaryRow::value("Grouping", format!("{:.2}", f.grouping)),
        SummaryRow::value("Total", format!("{:.3}", f.total)),
        SummaryRow::section("Rating"),
        SummaryRow::value("Base rating", format!("{:.0} A", result.base_rating.value())),
        SummaryRow::value(
            "Per circuit",
            format!("{:.0} A", result.final_rating_per_circuit.value()),
        ),
        SummaryRow::value(
            format!("Total ({} circuits)", result.number_of_circuits),
            format!("{:.0} A", result.final_rating_total.value()),
        ),
        SummaryRow::value("Required per circuit", format!("{:.1} A", rec.required_current_per_circuit.value())),
        SummaryRow::value("Safety margin", format!("{:.1} %", rec.safety_margin_percent)),
        SummaryRow::value("Recommended size", format!("{} mm²", rec.recommended_size.value())),
        SummaryRow::value("Capacity check", rec.status.label()),
        SummaryRow::section("Short circuit"),
    ]);
    if sc.status.is_applicable() {
        rows.extend([
            SummaryRow::value("Withstand", format!("{} kA", sc.withstand.value())),
            SummaryRow::value(
                "Minimum cross-section",
                format!("{} mm²", sc.minimum_cross_section.value()),
            ),
        ]);
    }
    rows.push(SummaryRow::value("Check", sc.status.label()));

    rows.push(SummaryRow::section("Voltage drop"));
    if vd.status.is_applicable() {
        rows.extend([
            SummaryRow::value("Drop", format!("{:.2} V", vd.drop.value())),
            SummaryRow::value(
                "Percent",
                format!("{:.2} % (limit {} %)", vd.percent, vd.limit_percent),
            ),
        ]);
    }
    rows.push(SummaryRow::value("Check", vd.status.label()));

    if let Some(r) = &result.resistance {
        let source = match r.source {
            ResistanceSource::Table => "table",
            ResistanceSource::Approximation => "approximation",
        };
        rows.push(SummaryRow::value(
            "Resistance",
            format!("{:.4} Ω/km ({source})", r.per_km.value()),
        ));
    }

    if pl.applicable {
        rows.push(SummaryRow::section("Power loss"));
        rows.push(SummaryRow::value(
            "Loss",
            format!("{:.0} W ({:.2} kW)", pl.loss.value(), pl.loss_kw.value()),
        ));
        if pl.apparent_power.value() > 0.0 {
            rows.push(SummaryRow::value(
                "Apparent power",
                format!("{:.1} kVA", pl.apparent_power.value()),
            ));
            rows.push(SummaryRow::value(
                "Efficiency",
                format!("{:.2} %", pl.efficiency_percent),
            ));
        }
    }
    rows
}
