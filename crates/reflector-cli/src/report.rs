// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Sweep Report
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Plain-text sweep summaries.

use reflector_types::config::{DesignKind, InputSpec, LengthUnit};
use reflector_types::state::{BestByKind, Candidate, SweepResult};
use std::fmt::Write;

/// Copy of `result` without plans and ray traces.
pub fn strip_payload(result: &SweepResult) -> SweepResult {
    let strip = |list: &[Candidate]| -> Vec<Candidate> {
        list.iter().map(Candidate::without_payload).collect()
    };
    let mut best_by_kind = BestByKind::default();
    for kind in DesignKind::ALL {
        *best_by_kind.slot_mut(kind) = result.best_by_kind.get(kind).map(Candidate::without_payload);
    }
    SweepResult {
        candidates: strip(&result.candidates),
        ranked: strip(&result.ranked),
        best_overall: result.best_overall.as_ref().map(Candidate::without_payload),
        best_by_kind,
        top: strip(&result.top),
    }
}

fn unit_label(unit: LengthUnit) -> &'static str {
    match unit {
        LengthUnit::Mm => "mm",
        LengthUnit::Inch => "in",
    }
}

fn candidate_line(rank: usize, c: &Candidate, unit: LengthUnit) -> String {
    let score = c.score.map_or(f64::NAN, |s| s.total);
    format!(
        "{rank:>3}  {:<18} Fp {:>4.1}  Fs {:>5.1}  tube {:>8.1} {u}  obstr {:>5.3}  wfe {:>7.3}  score {:>6.3}\n",
        c.kind,
        c.inputs.primary_f_ratio,
        c.inputs.system_f_ratio,
        unit.from_mm(c.geometry.tube_length_mm),
        c.geometry.obstruction_ratio,
        c.image_quality.wfe_rms_waves_edge,
        score,
        u = unit_label(unit),
    )
}

/// Human-readable sweep report, lengths in the input aperture unit.
pub fn sweep_summary(spec: &InputSpec, result: &SweepResult) -> String {
    let unit = spec.aperture.unit;
    let mut out = String::new();
    let _ = writeln!(out, "Reflector sweep: {}", spec.name);
    let _ = writeln!(
        out,
        "Aperture {:.2} {}, {} generated, {} passing",
        spec.aperture.value,
        unit_label(unit),
        result.candidates.len(),
        result.passing_count()
    );

    if result.ranked.is_empty() {
        let _ = writeln!(out, "No candidate meets the constraints.");
        let rejected = result.candidates.iter().take(5);
        for c in rejected {
            let _ = writeln!(
                out,
                "  {} Fp {:.1} Fs {:.1}: {}",
                c.kind,
                c.inputs.primary_f_ratio,
                c.inputs.system_f_ratio,
                c.constraints.reasons.join("; ")
            );
        }
        return out;
    }

    let _ = writeln!(out, "\nTop {}:", result.top.len());
    for (i, c) in result.top.iter().enumerate() {
        out.push_str(&candidate_line(i + 1, c, unit));
    }

    let _ = writeln!(out, "\nBest by kind:");
    for kind in DesignKind::ALL {
        match result.best_by_kind.get(kind) {
            Some(c) => out.push_str(&candidate_line(0, c, unit)),
            None => {
                let _ = writeln!(out, "  -  {kind:<18} none passing");
            }
        }
    }
    out
}
