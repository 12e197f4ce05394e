// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Candidate Scoring
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Batch-normalised weighted score.
//!
//! Scoring is two-phase: [`compute_score_bounds`] reduces the passing batch
//! to a WFE range, then [`score_candidate`] maps each candidate through it.
//! Every term lies in [0, 1] with 1 best.

use reflector_types::config::ScoreWeights;
use reflector_types::constants::OBSTRUCTION_PENALTY;
use reflector_types::state::{Candidate, ScoreBounds, ScoreBreakdown, ScoreResult};

fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// WFE range over the finite values of passing candidates; [0, 1] if none.
pub fn compute_score_bounds(candidates: &[Candidate]) -> ScoreBounds {
    let (min, max) = candidates
        .iter()
        .filter(|c| c.constraints.pass)
        .map(|c| c.image_quality.wfe_rms_waves_edge)
        .filter(|w| w.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), w| {
            (lo.min(w), hi.max(w))
        });
    if min.is_finite() && max.is_finite() {
        ScoreBounds {
            min_wfe_rms: min,
            max_wfe_rms: max,
        }
    } else {
        ScoreBounds::default()
    }
}

/// 1 at the best WFE of the batch, 0 at the worst or when undefined.
pub fn aberration_term(wfe: f64, bounds: &ScoreBounds) -> f64 {
    if !wfe.is_finite() {
        return 0.0;
    }
    let span = bounds.max_wfe_rms - bounds.min_wfe_rms;
    if span.is_nan() || span <= 0.0 {
        return 1.0;
    }
    1.0 - clamp01((wfe - bounds.min_wfe_rms) / span)
}

/// 1 − (o + c·o²): convex so heavy obstruction costs more than its area.
pub fn obstruction_term(obstruction_ratio: f64) -> f64 {
    let o = obstruction_ratio;
    clamp01(1.0 - (o + OBSTRUCTION_PENALTY * o * o))
}

pub fn score_breakdown(candidate: &Candidate, bounds: &ScoreBounds) -> ScoreBreakdown {
    ScoreBreakdown {
        light: clamp01(candidate.throughput.usable_light_efficiency),
        aberration: aberration_term(candidate.image_quality.wfe_rms_waves_edge, bounds),
        obstruction: obstruction_term(candidate.geometry.obstruction_ratio),
    }
}

/// Copy of `candidate` with `score` populated.
pub fn score_candidate(candidate: &Candidate, bounds: &ScoreBounds, weights: &ScoreWeights) -> Candidate {
    let breakdown = score_breakdown(candidate, bounds);
    let total = weights.light * breakdown.light
        + weights.aberration * breakdown.aberration
        + weights.obstruction * breakdown.obstruction;
    Candidate {
        score: Some(ScoreResult { total, breakdown }),
        ..candidate.clone()
    }
}
