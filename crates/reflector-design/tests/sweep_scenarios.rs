// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Sweep Scenario Tests
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! End-to-end sweeps over realistic input specs.

use reflector_design::constraints::check_constraints;
use reflector_design::{infer_derived_limits, run_sweep};
use reflector_types::config::{DesignKind, FRatioRange, InputSpec, Length};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn twelve_inch_newtonian() -> InputSpec {
    let mut spec = InputSpec::default();
    spec.name = "12in newtonian".into();
    spec.aperture = Length::inch(12.0);
    spec.design_kinds = vec![DesignKind::Newtonian];
    spec.sweep.primary_f_ratio = FRatioRange {
        min: 4.0,
        max: 5.0,
        step: 0.5,
    };
    spec
}

// ── Newtonian end to end ─────────────────────────────────────────────

#[test]
fn newtonian_twelve_inch_sweep() {
    init_logging();
    let spec = twelve_inch_newtonian();
    let result = run_sweep(&spec, 10).expect("valid spec");

    assert_eq!(result.candidates.len(), 3);
    for (candidate, fp) in result.candidates.iter().zip([4.0, 4.5, 5.0]) {
        assert_eq!(candidate.kind, DesignKind::Newtonian);
        assert!((candidate.inputs.primary_f_ratio - fp).abs() < 1e-12);
        let expected_tube = fp * 304.8 + 25.0;
        assert!(
            (candidate.geometry.tube_length_mm - expected_tube).abs() < 1e-6,
            "tube {} vs {expected_tube}",
            candidate.geometry.tube_length_mm
        );
        assert!(candidate.constraints.pass, "{:?}", candidate.constraints.reasons);
    }
    assert_eq!(result.ranked.len(), 3);
    assert_eq!(result.top.len(), 3);

    let best = result.best_overall.as_ref().expect("best candidate");
    let max_score = result
        .ranked
        .iter()
        .map(|c| c.total_score())
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(best.total_score(), max_score);
    // Slowest primary has the least coma and the same obstruction.
    assert!((best.inputs.primary_f_ratio - 5.0).abs() < 1e-12);
    assert!(result.best_by_kind.get(DesignKind::Newtonian).is_some());
    assert!(result.best_by_kind.get(DesignKind::Cassegrain).is_none());
}

#[test]
fn newtonian_tight_tube_limit_filters() {
    init_logging();
    let mut spec = twelve_inch_newtonian();
    // 4.5 · 304.8 + 25 = 1396.6
    spec.constraints.max_tube_length = Length::mm(1400.0);
    let result = run_sweep(&spec, 10).expect("valid spec");
    assert_eq!(result.candidates.len(), 3);
    assert_eq!(result.ranked.len(), 2);
    let rejected = &result.candidates[2];
    assert!(!rejected.constraints.pass);
    assert!(rejected.constraints.reasons[0].contains("tube length"));
}

// ── Folded designs ───────────────────────────────────────────────────

#[test]
fn default_sweep_covers_every_family() {
    init_logging();
    let mut spec = InputSpec::default();
    spec.sweep.primary_f_ratio = FRatioRange {
        min: 3.0,
        max: 4.0,
        step: 1.0,
    };
    spec.sweep.system_f_ratio = FRatioRange {
        min: 10.0,
        max: 12.0,
        step: 2.0,
    };
    let result = run_sweep(&spec, 3).expect("valid spec");

    // 2 Newtonian + 3 folded kinds × 2 Fp × 2 Fs
    assert_eq!(result.candidates.len(), 14);
    for kind in DesignKind::ALL {
        assert!(result.candidates.iter().any(|c| c.kind == kind), "missing {kind}");
    }
    assert_eq!(result.top.len(), 3);
    for pair in result.ranked.windows(2) {
        assert!(pair[0].total_score() >= pair[1].total_score());
    }
}

#[test]
fn constraint_flags_match_independent_check() {
    init_logging();
    let mut spec = InputSpec::default();
    spec.constraints.max_obstruction_ratio = 0.33;
    spec.sweep.primary_f_ratio = FRatioRange {
        min: 3.0,
        max: 5.0,
        step: 1.0,
    };
    let result = run_sweep(&spec, 5).expect("valid spec");
    assert!(!result.candidates.is_empty());
    for candidate in &result.candidates {
        let recheck = check_constraints(&candidate.geometry, &spec.constraints);
        assert_eq!(candidate.constraints.pass, recheck.pass);
        assert_eq!(candidate.constraints.pass, candidate.constraints.reasons.is_empty());
    }
    for candidate in &result.ranked {
        assert!(candidate.constraints.pass);
        assert!(candidate.geometry.obstruction_ratio <= 0.33);
        assert!(candidate.score.is_some());
    }
}

#[test]
fn backfocus_target_is_laid_out_exactly() {
    init_logging();
    let mut spec = InputSpec::default();
    spec.design_kinds = vec![DesignKind::Cassegrain, DesignKind::RitcheyChretien];
    spec.constraints.min_backfocus = Length::mm(150.0);
    let result = run_sweep(&spec, 1).expect("valid spec");
    assert!(!result.candidates.is_empty());
    for candidate in &result.candidates {
        assert!((candidate.geometry.backfocus_mm - 150.0).abs() < 1e-9);
    }
}

// ── Degenerate inputs ────────────────────────────────────────────────

#[test]
fn inverted_range_is_empty_result() {
    let mut spec = twelve_inch_newtonian();
    spec.sweep.primary_f_ratio = FRatioRange {
        min: 6.0,
        max: 4.0,
        step: 0.5,
    };
    let result = run_sweep(&spec, 5).expect("valid spec");
    assert!(result.candidates.is_empty());
    assert!(result.ranked.is_empty());
    assert!(result.best_overall.is_none());
    assert!(result.top.is_empty());
}

#[test]
fn zero_step_is_empty_result() {
    let mut spec = twelve_inch_newtonian();
    spec.sweep.primary_f_ratio.step = 0.0;
    let result = run_sweep(&spec, 5).expect("valid spec");
    assert!(result.candidates.is_empty());
}

#[test]
fn zero_top_n_keeps_ranking() {
    let spec = twelve_inch_newtonian();
    let result = run_sweep(&spec, 0).expect("valid spec");
    assert!(result.top.is_empty());
    assert_eq!(result.ranked.len(), 3);
}

// ── Derived limits ───────────────────────────────────────────────────

#[test]
fn derived_limits_for_newtonian() {
    init_logging();
    let mut spec = twelve_inch_newtonian();
    spec.constraints.max_tube_length = Length::mm(1400.0);
    let out = infer_derived_limits(&spec).expect("valid spec");
    let limits = out.derived_limits.expect("populated");
    assert_eq!(limits.feasible_trials, 2);
    assert_eq!(limits.primary_f_ratio_min, Some(4.0));
    assert_eq!(limits.primary_f_ratio_max, Some(4.5));
    // No folded design enabled.
    assert!(limits.system_f_ratio_min.is_none());
    assert!(limits.system_f_ratio_max.is_none());
}

#[test]
fn derived_limits_round_trip_json() {
    let spec = twelve_inch_newtonian();
    let out = infer_derived_limits(&spec).expect("valid spec");
    let json = serde_json::to_string(&out).expect("serialize");
    let back = InputSpec::from_json(&json).expect("reload");
    assert_eq!(back.derived_limits, out.derived_limits);
}

// ── Bundled specs ────────────────────────────────────────────────────

#[test]
fn bundled_specs_load() {
    let newtonian = InputSpec::from_json(include_str!("../../../specs/newtonian_12in.json"))
        .expect("newtonian spec");
    assert_eq!(newtonian.design_kinds, vec![DesignKind::Newtonian]);
    assert!((newtonian.aperture_mm() - 304.8).abs() < 1e-9);

    let all = InputSpec::from_json(include_str!("../../../specs/eight_inch_all.json"))
        .expect("all-families spec");
    assert_eq!(all.enabled_kinds().len(), 4);
    assert!((all.constraints.min_backfocus.to_mm() - 101.6).abs() < 1e-9);
    assert_eq!(all.sample.pupil.steps, 13);
}
