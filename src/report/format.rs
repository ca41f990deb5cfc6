//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the engine stays free of presentation concerns
//! - output changes are localized (important for snapshot tests)

use crate::domain::{Regime, TitrationCurve, TitrationParameters};
use crate::report::{RegimeCounts, SteepestStep};
use crate::sweep::{SweepPoint, SweepSpec};

/// Format the curve summary (inputs + equivalence annotations + diagnostics).
pub fn format_curve_summary(
    curve: &TitrationCurve,
    counts: &RegimeCounts,
    steepest: Option<&SteepestStep>,
) -> String {
    let p = &curve.parameters;
    let a = &curve.annotations;
    let mut out = String::new();

    out.push_str("=== titr - Acid/Base Titration Curve ===\n");
    out.push_str(&format!("Reaction: {}\n", a.reaction.display_name()));
    out.push_str(&format_reactants(p));
    out.push_str(&format!(
        "Volume: [{:.2}, {:.2}] mL | samples={}\n",
        p.volume_range.min_ml, p.volume_range.max_ml, p.sample_count
    ));

    out.push_str("\nEquivalence:\n");
    let in_range = if a.equivalence_in_range { "" } else { " (outside sampled range)" };
    out.push_str(&format!(
        "- V_eq: {:.3} mL{in_range}\n",
        a.equivalence_volume_ml
    ));
    if let (Some(v_half), Some(pk)) = (a.half_equivalence_volume_ml, a.pk) {
        out.push_str(&format!("- V_eq/2: {v_half:.3} mL (buffer midpoint, pK={pk:.3})\n"));
    }
    if a.neutral_reference {
        out.push_str("- neutral reference: pH 7.00\n");
    }
    if let Some(s) = steepest {
        out.push_str(&format!(
            "- steepest sampled step: {:.3} mL (|dpH|={:.3})\n",
            s.volume_ml, s.delta_ph
        ));
    }

    out.push_str(&format!(
        "\nRegimes: pre={} | equivalence={} | post={}",
        counts.pre, counts.equivalence, counts.post
    ));
    if counts.unsupported > 0 {
        out.push_str(&format!(" | unsupported={}", counts.unsupported));
    }
    out.push('\n');

    out
}

/// Format every `every`-th sample (the last sample is always included).
pub fn format_sample_table(curve: &TitrationCurve, regimes: &[Regime], every: usize) -> String {
    let every = every.max(1);
    let mut out = String::new();
    out.push_str(format!("{:>12} {:>8} {:<12}", "volume_ml", "pH", "regime").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<12} {:-<8} {:-<12}", "", "", "").trim_end());
    out.push('\n');

    let last = curve.samples.len().saturating_sub(1);
    for (i, s) in curve.samples.iter().enumerate() {
        if i % every != 0 && i != last {
            continue;
        }
        let regime = regimes.get(i).map(|r| r.label()).unwrap_or("");
        out.push_str(format!("{:>12.3} {:>8.3} {:<12}", s.volume_ml, s.ph, regime).trim_end());
        out.push('\n');
    }

    out
}

/// Format a single-volume evaluation.
pub fn format_point(params: &TitrationParameters, volume_ml: f64, ph: f64, regime: Regime) -> String {
    let mut out = String::new();
    out.push_str(&format!("Reaction: {}\n", params.reaction().display_name()));
    out.push_str(&format_reactants(params));
    out.push_str(&format!(
        "V={volume_ml:.3} mL -> pH={ph:.3} ({})\n",
        regime.label()
    ));
    out
}

/// Format a sweep result table.
pub fn format_sweep_table(spec: &SweepSpec, points: &[SweepPoint]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Sweep: {} over [{}, {}] ({} steps, {})\n",
        spec.axis.label(),
        fmt_value(spec.min),
        fmt_value(spec.max),
        spec.steps,
        if spec.log { "log" } else { "linear" }
    ));
    out.push_str(
        format!(
            "{:>12} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "value", "V_eq_mL", "pH_start", "pH_half", "pH_eq", "pH_end"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<12} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10}",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for p in points {
        let first = p.curve.samples.first().map(|s| s.ph).unwrap_or(f64::NAN);
        let last = p.curve.samples.last().map(|s| s.ph).unwrap_or(f64::NAN);
        out.push_str(
            format!(
                "{:>12} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
                fmt_value(p.value),
                p.equivalence_volume_ml,
                first,
                p.ph_half_equivalence,
                p.ph_equivalence,
                last
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn format_reactants(p: &TitrationParameters) -> String {
    let mut out = format!(
        "Analyte: {} {:.4} M x {:.2} mL",
        p.analyte_kind.display_name(),
        p.analyte_concentration,
        p.analyte_volume_ml
    );
    if p.uses_ka() {
        if let Some(ka) = p.ka {
            out.push_str(&format!(" (Ka={})", fmt_value(ka)));
        }
    }
    if p.uses_kb() {
        if let Some(kb) = p.kb {
            out.push_str(&format!(" (Kb={})", fmt_value(kb)));
        }
    }
    out.push_str(&format!(
        "\nTitrant: {} {:.4} M\n",
        p.titrant_kind.display_name(),
        p.titrant_concentration
    ));
    out
}

/// Scientific notation for small constants, fixed otherwise.
fn fmt_value(v: f64) -> String {
    if v != 0.0 && v.abs() < 1e-3 {
        format!("{v:.3e}")
    } else {
        format!("{v:.4}")
    }
}
