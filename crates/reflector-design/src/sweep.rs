// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Parameter Sweep
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Grid sweep over design kind × primary f-ratio × system f-ratio.
//!
//! Pipeline: enumerate trials → generate under relaxed limits (parallel,
//! order preserving) → apply the real limits → bound WFE over the passing
//! set → score → stable sort → best per kind → top N.

use crate::constraints::apply_constraints;
use crate::generator::{generate, FRatioTrial};
use crate::scoring::{compute_score_bounds, score_candidate};
use rayon::prelude::*;
use reflector_types::config::{DerivedLimits, DesignKind, FRatioRange, InputSpec, ScoreWeights};
use reflector_types::constants::RANGE_EPS;
use reflector_types::error::ReflectorResult;
use reflector_types::state::{BestByKind, Candidate, SweepResult};

/// Inclusive values min, min + step, … ≤ max. Empty for a degenerate range.
pub fn f_ratio_values(range: &FRatioRange) -> Vec<f64> {
    let FRatioRange { min, max, step } = *range;
    if !min.is_finite() || !max.is_finite() || !step.is_finite() || step <= 0.0 || max < min {
        return Vec::new();
    }
    let mut values = Vec::new();
    let mut i = 0usize;
    loop {
        let v = min + i as f64 * step;
        if v > max + RANGE_EPS {
            break;
        }
        values.push(v);
        i += 1;
    }
    values
}

/// System f-ratios for folded designs, falling back to the target ratio.
pub fn system_f_ratio_values(spec: &InputSpec) -> Vec<f64> {
    let values = f_ratio_values(&spec.sweep.system_f_ratio);
    if !values.is_empty() {
        return values;
    }
    let target = spec.sweep.target_system_f_ratio;
    if target.is_finite() && target > 0.0 {
        vec![target]
    } else {
        Vec::new()
    }
}

/// Every (kind, trial) in enumeration order: kind, then Fp, then Fs.
pub fn enumerate_trials(spec: &InputSpec) -> Vec<(DesignKind, FRatioTrial)> {
    let primaries = f_ratio_values(&spec.sweep.primary_f_ratio);
    let systems = system_f_ratio_values(spec);
    let mut trials = Vec::new();
    for kind in spec.enabled_kinds() {
        for &fp in &primaries {
            if kind.is_folded() {
                trials.extend(systems.iter().map(|&fs| (kind, FRatioTrial::new(fp, fs))));
            } else {
                trials.push((kind, FRatioTrial::new(fp, fp)));
            }
        }
    }
    trials
}

/// Generate every valid candidate, checked against the real input limits.
pub fn generate_candidates(spec: &InputSpec) -> Vec<Candidate> {
    let trials = enumerate_trials(spec);
    let relaxed = spec.relaxed();
    let candidates: Vec<Candidate> = trials
        .par_iter()
        .filter_map(|&(kind, trial)| generate(kind, &relaxed, trial))
        .map(|candidate| apply_constraints(candidate, &spec.constraints))
        .collect();
    log::debug!(
        "'{}': {} trials, {} candidates generated",
        spec.name,
        trials.len(),
        candidates.len()
    );
    candidates
}

/// Score and rank an already-checked batch.
pub fn rank_candidates(candidates: Vec<Candidate>, weights: &ScoreWeights, top_n: usize) -> SweepResult {
    if !candidates.iter().any(|c| c.constraints.pass) {
        return SweepResult::empty(candidates);
    }

    let bounds = compute_score_bounds(&candidates);
    let mut ranked: Vec<Candidate> = candidates
        .iter()
        .filter(|c| c.constraints.pass)
        .map(|c| score_candidate(c, &bounds, weights))
        .collect();
    ranked.sort_by(|a, b| b.total_score().total_cmp(&a.total_score()));

    let mut best_by_kind = BestByKind::default();
    for candidate in &ranked {
        let slot = best_by_kind.slot_mut(candidate.kind);
        if slot.is_none() {
            *slot = Some(candidate.clone());
        }
    }
    let best_overall = ranked.first().cloned();
    let top = ranked.iter().take(top_n).cloned().collect();

    SweepResult {
        candidates,
        ranked,
        best_overall,
        best_by_kind,
        top,
    }
}

/// Run the full sweep for `spec`, keeping the `top_n` best candidates in `top`.
pub fn run_sweep(spec: &InputSpec, top_n: usize) -> ReflectorResult<SweepResult> {
    spec.validate()?;
    let candidates = generate_candidates(spec);
    let result = rank_candidates(candidates, &spec.weights, top_n);

    match &result.best_overall {
        Some(best) => log::info!(
            "'{}': {} generated, {} passing, best {} Fp {:.2} Fs {:.2} score {:.3}",
            spec.name,
            result.candidates.len(),
            result.passing_count(),
            best.kind,
            best.inputs.primary_f_ratio,
            best.inputs.system_f_ratio,
            best.total_score()
        ),
        None => log::info!(
            "'{}': {} generated, none passing",
            spec.name,
            result.candidates.len()
        ),
    }
    Ok(result)
}

fn extend_bounds(bounds: &mut Option<(f64, f64)>, value: f64) {
    *bounds = Some(match *bounds {
        Some((lo, hi)) => (lo.min(value), hi.max(value)),
        None => (value, value),
    });
}

/// Feasible f-ratio bounds among trials that pass the real input limits.
///
/// System bounds come from folded designs only. Returns a copy of `spec`
/// with `derived_limits` populated.
pub fn infer_derived_limits(spec: &InputSpec) -> ReflectorResult<InputSpec> {
    spec.validate()?;
    let candidates = generate_candidates(spec);

    let mut primary = None;
    let mut system = None;
    let mut feasible_trials = 0;
    for candidate in candidates.iter().filter(|c| c.constraints.pass) {
        feasible_trials += 1;
        extend_bounds(&mut primary, candidate.inputs.primary_f_ratio);
        if candidate.kind.is_folded() {
            extend_bounds(&mut system, candidate.inputs.system_f_ratio);
        }
    }

    let limits = DerivedLimits {
        primary_f_ratio_min: primary.map(|(lo, _)| lo),
        primary_f_ratio_max: primary.map(|(_, hi)| hi),
        system_f_ratio_min: system.map(|(lo, _)| lo),
        system_f_ratio_max: system.map(|(_, hi)| hi),
        feasible_trials,
    };
    log::info!(
        "'{}': {} feasible of {} generated",
        spec.name,
        feasible_trials,
        candidates.len()
    );

    Ok(InputSpec {
        derived_limits: Some(limits),
        ..spec.clone()
    })
}
