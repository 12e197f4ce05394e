// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Design Constraints
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Feasibility limits checked against candidate geometry, in millimetres.

use reflector_types::config::Constraints;
use reflector_types::state::{Candidate, ConstraintResult, GeometryMetrics};

/// Check geometry against the limits. Non-finite metrics always violate.
pub fn check_constraints(geometry: &GeometryMetrics, constraints: &Constraints) -> ConstraintResult {
    let max_tube = constraints.max_tube_length.to_mm();
    let max_obstruction = constraints.max_obstruction_ratio;
    let min_backfocus = constraints.min_backfocus.to_mm();
    let mut reasons = Vec::new();

    let tube = geometry.tube_length_mm;
    if !tube.is_finite() || tube > max_tube {
        reasons.push(format!(
            "tube length {tube:.1} mm exceeds max {max_tube:.1} mm"
        ));
    }
    let obstruction = geometry.obstruction_ratio;
    if !obstruction.is_finite() || obstruction > max_obstruction {
        reasons.push(format!(
            "obstruction ratio {obstruction:.3} exceeds max {max_obstruction:.3}"
        ));
    }
    let backfocus = geometry.backfocus_mm;
    if !backfocus.is_finite() || backfocus < min_backfocus {
        reasons.push(format!(
            "backfocus {backfocus:.1} mm below min {min_backfocus:.1} mm"
        ));
    }

    ConstraintResult::from_reasons(reasons)
}

/// Copy of `candidate` with its constraint result recomputed.
pub fn apply_constraints(candidate: Candidate, constraints: &Constraints) -> Candidate {
    let result = check_constraints(&candidate.geometry, constraints);
    Candidate {
        constraints: result,
        ..candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflector_types::config::Length;

    fn geometry(tube: f64, obstruction: f64, backfocus: f64) -> GeometryMetrics {
        GeometryMetrics {
            tube_length_mm: tube,
            backfocus_mm: backfocus,
            mirror_spacing_mm: 500.0,
            secondary_diameter_mm: 60.0,
            obstruction_diameter_mm: 60.0,
            obstruction_ratio: obstruction,
        }
    }

    #[test]
    fn test_all_within_limits() {
        let result = check_constraints(&geometry(1500.0, 0.3, 150.0), &Constraints::default());
        assert!(result.pass);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_each_violation_reported_in_order() {
        let result = check_constraints(&geometry(2500.0, 0.5, 50.0), &Constraints::default());
        assert!(!result.pass);
        assert_eq!(result.reasons.len(), 3);
        assert!(result.reasons[0].starts_with("tube length"));
        assert!(result.reasons[1].starts_with("obstruction ratio"));
        assert!(result.reasons[2].starts_with("backfocus"));
    }

    #[test]
    fn test_limits_compared_in_mm() {
        let constraints = Constraints {
            max_tube_length: Length::inch(40.0),
            max_obstruction_ratio: 0.4,
            min_backfocus: Length::inch(4.0),
        };
        // 40 in = 1016 mm, 4 in = 101.6 mm
        assert!(check_constraints(&geometry(1000.0, 0.2, 102.0), &constraints).pass);
        assert!(!check_constraints(&geometry(1020.0, 0.2, 102.0), &constraints).pass);
        assert!(!check_constraints(&geometry(1000.0, 0.2, 101.0), &constraints).pass);
    }

    #[test]
    fn test_nan_metric_fails() {
        let result = check_constraints(&geometry(f64::NAN, 0.2, 150.0), &Constraints::default());
        assert!(!result.pass);
    }

    #[test]
    fn test_relaxed_limits_pass_any_finite_geometry() {
        let result = check_constraints(&geometry(1e6, 0.99, 0.0), &Constraints::relaxed());
        assert!(result.pass);
    }
}
