//! Plain-text calculation report.
//!
//! Lays out the same content as a printed cable sizing sheet: the cable and
//! its installation, each derating factor, the derated rating against the
//! load, and the short-circuit, voltage-drop and power-loss checks, ending
//! with a conclusion over every applicable check.

use cable_core::{
    CableParameters, CableRatingResult, CheckStatus, Installation, ResistanceSource, Severity,
};
use chrono::{DateTime, Utc};
use std::io::{self, Write};

const RULE: &str =
    "==============================================================================";
const THIN_RULE: &str =
    "------------------------------------------------------------------------------";

/// Render the report into a string.
pub fn render_report(
    params: &CableParameters,
    result: &CableRatingResult,
    table_source: &str,
    generated: DateTime<Utc>,
) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_report(params, result, table_source, generated, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write the report to any writer.
pub fn write_report<W: Write>(
    params: &CableParameters,
    result: &CableRatingResult,
    table_source: &str,
    generated: DateTime<Utc>,
    w: &mut W,
) -> io::Result<()> {
    writeln!(w, "{RULE}")?;
    writeln!(w, "CABLE SIZING CALCULATION REPORT")?;
    writeln!(
        w,
        "{} {} cable, {}, {} mm²",
        params.material.label(),
        params.construction.label(),
        params.voltage_rating,
        params.conductor_size.value()
    )?;
    writeln!(w, "Generated: {}", generated.format("%Y-%m-%d %H:%M UTC"))?;
    writeln!(w, "Tables:    {table_source}")?;
    writeln!(w, "{RULE}")?;

    write_specification(params, w)?;
    write_installation(params, w)?;
    write_derating(params, result, w)?;
    write_rating(params, result, w)?;
    write_short_circuit(params, result, w)?;
    write_voltage_drop(params, result, w)?;
    write_power_loss(params, result, w)?;
    write_notes(result, w)?;
    write_conclusion(params, result, w)?;
    Ok(())
}

fn section<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{title}")?;
    writeln!(w, "{THIN_RULE}")
}

fn line<W: Write>(w: &mut W, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
    writeln!(w, "  {label:<46} = {value}")
}

fn write_specification<W: Write>(params: &CableParameters, w: &mut W) -> io::Result<()> {
    section(w, "1. CABLE SPECIFICATION")?;
    line(w, "Conductor material", params.material.label())?;
    line(w, "Construction", params.construction.label())?;
    line(w, "Voltage class", &params.voltage_rating)?;
    line(w, "Conductor size", format!("{} mm²", params.conductor_size.value()))?;
    if let Some(arrangement) = params.arrangement {
        line(w, "Arrangement", arrangement.label())?;
    }
    line(w, "Cable length", format!("{:.3} km", params.cable_length.value() / 1000.0))?;
    Ok(())
}

fn write_installation<W: Write>(params: &CableParameters, w: &mut W) -> io::Result<()> {
    section(w, "2. INSTALLATION CONDITIONS")?;
    line(w, "Installation", params.installation.label())?;
    if params.installation == Installation::InAir {
        if let Some(method) = params.air_installation_method {
            line(w, "Support system", method.label())?;
        }
        if let Some(trays) = params.number_of_trays {
            line(w, "Number of trays/ladders", trays)?;
        }
    }
    if let Some(spacing) = &params.cable_spacing {
        line(w, "Cable spacing", spacing)?;
    }
    line(w, "Ambient temperature", format!("{} °C", params.ambient_temperature.value()))?;
    if params.installation.is_underground() {
        line(w, "Depth of laying", format!("{} mm", params.depth_of_laying.value()))?;
        line(
            w,
            "Soil thermal resistivity",
            format!("{} K·m/W", params.soil_thermal_resistivity.value()),
        )?;
    }
    line(w, "Number of circuits", params.number_of_circuits)?;
    Ok(())
}

fn write_derating<W: Write>(
    params: &CableParameters,
    result: &CableRatingResult,
    w: &mut W,
) -> io::Result<()> {
    let f = &result.derating;
    section(w, "3. DERATING FACTORS")?;
    line(w, "Derating due to ambient temperature", format!("{:.2}", f.temperature))?;
    if f.ground_factors_applicable {
        line(w, "Derating due to depth of laying", format!("{:.2}", f.depth))?;
        line(w, "Derating due to soil resistivity", format!("{:.2}", f.resistivity))?;
    }
    line(
        w,
        &format!("Derating due to grouping ({} circuits)", params.number_of_circuits),
        format!("{:.2}", f.grouping),
    )?;
    line(w, "Overall derating factor", format!("{:.3}", f.total))?;
    Ok(())
}

fn write_rating<W: Write>(
    params: &CableParameters,
    result: &CableRatingResult,
    w: &mut W,
) -> io::Result<()> {
    let rec = &result.recommendation;
    section(w, "4. CURRENT RATING")?;
    line(w, "Continuous rating of the selected cable", format!("{:.0} A", result.base_rating.value()))?;
    line(
        w,
        "Derated current per circuit",
        format!("{:.0} A", result.final_rating_per_circuit.value()),
    )?;
    line(
        w,
        &format!("Derated current for {} circuit(s)", result.number_of_circuits),
        format!("{:.0} A", result.final_rating_total.value()),
    )?;
    line(w, "Required current (total)", format!("{:.1} A", params.required_current.value()))?;
    line(
        w,
        "Operating current per circuit",
        format!("{:.1} A", rec.required_current_per_circuit.value()),
    )?;
    if rec.status.is_applicable() {
        line(w, "Safety margin", format!("{:.1} %", rec.safety_margin_percent))?;
        line(w, "Recommended size", format!("{} mm²", rec.recommended_size.value()))?;
    }
    line(w, "Current capacity check", rec.status)?;
    Ok(())
}

fn write_short_circuit<W: Write>(
    params: &CableParameters,
    result: &CableRatingResult,
    w: &mut W,
) -> io::Result<()> {
    let sc = &result.short_circuit;
    section(w, "5. SHORT CIRCUIT")?;
    if !sc.status.is_applicable() {
        writeln!(w, "  Not checked: no short-circuit current given.")?;
        return Ok(());
    }
    line(w, "Short-circuit current (3-phase)", format!("{} kA", sc.fault_current.value()))?;
    line(w, "Fault duration", format!("{} s", params.fault_duration.value()))?;
    line(w, "Material constant k", sc.k_constant)?;
    writeln!(w, "  Cross-section required: A = Isc × √t / k")?;
    line(
        w,
        "Minimum cross-section A",
        format!("{} mm²", sc.minimum_cross_section.value()),
    )?;
    line(w, "Withstand capacity", format!("{} kA", sc.withstand.value()))?;
    line(w, "Short-circuit verification", sc.status)?;
    Ok(())
}

fn write_voltage_drop<W: Write>(
    params: &CableParameters,
    result: &CableRatingResult,
    w: &mut W,
) -> io::Result<()> {
    let vd = &result.voltage_drop;
    section(w, "6. VOLTAGE DROP")?;
    if !vd.status.is_applicable() {
        writeln!(w, "  Not checked: required current and supply voltage are both needed.")?;
        return Ok(());
    }
    if vd.three_phase {
        writeln!(w, "  %Vd = √3 × IL × R × L × 100 / (N × V)")?;
    } else {
        writeln!(w, "  %Vd = IL × R × L × 100 / (N × V)")?;
    }
    line(w, "Supply voltage", format!("{} V", params.supply_voltage.value()))?;
    write_resistance(result, w)?;
    line(w, "Voltage drop", format!("{:.2} V", vd.drop.value()))?;
    line(w, "Voltage drop percentage", format!("{:.2} %", vd.percent))?;
    line(w, "Permissible voltage drop", format!("{} %", vd.limit_percent))?;
    line(w, "Voltage drop check", vd.status)?;
    Ok(())
}

fn write_resistance<W: Write>(result: &CableRatingResult, w: &mut W) -> io::Result<()> {
    if let Some(r) = &result.resistance {
        let source = match r.source {
            ResistanceSource::Table => "tabulated",
            ResistanceSource::Approximation => "from resistivity",
        };
        line(
            w,
            "Conductor resistance",
            format!("{:.4} Ω/km ({source})", r.per_km.value()),
        )?;
        line(w, "Run resistance", format!("{:.4} Ω", r.total.value()))?;
    }
    Ok(())
}

fn write_power_loss<W: Write>(
    params: &CableParameters,
    result: &CableRatingResult,
    w: &mut W,
) -> io::Result<()> {
    let pl = &result.power_loss;
    section(w, "7. POWER LOSS")?;
    if !pl.applicable {
        writeln!(w, "  Not computed: no required current given.")?;
        return Ok(());
    }
    if pl.three_phase {
        writeln!(w, "  Ploss = 3 × IL² × R × N")?;
    } else {
        writeln!(w, "  Ploss = IL² × R × N")?;
    }
    line(w, "Power loss", format!("{:.0} W ({:.2} kW)", pl.loss.value(), pl.loss_kw.value()))?;
    if pl.apparent_power.value() > 0.0 {
        line(w, "Apparent power", format!("{:.1} kVA", pl.apparent_power.value()))?;
        line(w, "Power factor", "1.00")?;
        line(w, "Transmission efficiency", format!("{:.2} %", pl.efficiency_percent))?;
    } else if params.supply_voltage.value() <= 0.0 {
        writeln!(w, "  Efficiency not computed: no supply voltage given.")?;
    }
    Ok(())
}

fn write_notes<W: Write>(result: &CableRatingResult, w: &mut W) -> io::Result<()> {
    if !result.diagnostics.has_issues() {
        return Ok(());
    }
    section(w, "NOTES")?;
    for issue in &result.diagnostics.issues {
        let marker = match issue.severity {
            Severity::Warning => "*",
            Severity::Error => "!",
        };
        writeln!(w, "  {marker} {}: {}", issue.category, issue.message)?;
    }
    Ok(())
}

/// Labels of applicable checks that failed.
pub fn failed_checks(result: &CableRatingResult) -> Vec<&'static str> {
    [
        ("current capacity", result.recommendation.status),
        ("short circuit", result.short_circuit.status),
        ("voltage drop", result.voltage_drop.status),
    ]
    .into_iter()
    .filter(|(_, status)| *status == CheckStatus::Fail)
    .map(|(name, _)| name)
    .collect()
}

fn write_conclusion<W: Write>(
    params: &CableParameters,
    result: &CableRatingResult,
    w: &mut W,
) -> io::Result<()> {
    section(w, "CONCLUSION")?;
    let failed = failed_checks(result);
    if failed.is_empty() {
        writeln!(w, "  The selected cable is ADEQUATE for every applicable check.")?;
    } else {
        writeln!(
            w,
            "  The selected cable is NOT ADEQUATE: failed {}.",
            failed.join(", ")
        )?;
        let rec = &result.recommendation;
        if rec.status == CheckStatus::Fail {
            if rec.recommended_size == params.conductor_size {
                writeln!(w, "  No listed size carries the required current; add circuits.")?;
            } else {
                writeln!(
                    w,
                    "  Consider {} mm² under the same conditions.",
                    rec.recommended_size.value()
                )?;
            }
        }
    }
    writeln!(w, "{RULE}")
}
