// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Cassegrain Generator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Classical Cassegrain: paraboloid primary, hyperboloid secondary.

use crate::generator::FRatioTrial;
use crate::layout::{build_two_mirror, classical_conics, FamilyParams, TwoMirrorLayout};
use reflector_types::config::{DesignKind, InputSpec};
use reflector_types::state::Candidate;

pub const BAFFLE_FACTOR: f64 = 1.05;

pub fn generate(spec: &InputSpec, trial: FRatioTrial) -> Option<Candidate> {
    let layout = TwoMirrorLayout::from_spec(spec, trial)?;
    let (primary_conic, secondary_conic) = classical_conics(layout.magnification);
    Some(build_two_mirror(
        spec,
        trial,
        &layout,
        FamilyParams {
            kind: DesignKind::Cassegrain,
            baffle_factor: BAFFLE_FACTOR,
            primary_conic,
            secondary_conic,
            corrector_transmission: None,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflector_types::config::Length;

    #[test]
    fn test_obstruction_includes_baffle() {
        let c = generate(&InputSpec::default(), FRatioTrial::new(4.0, 12.0)).expect("valid");
        let expected = BAFFLE_FACTOR * c.geometry.secondary_diameter_mm;
        assert!((c.geometry.obstruction_diameter_mm - expected).abs() < 1e-9);
        assert!((c.geometry.obstruction_ratio - expected / 203.2).abs() < 1e-9);
        assert_eq!(c.kind, DesignKind::Cassegrain);
    }

    #[test]
    fn test_backfocus_is_design_target() {
        let c = generate(&InputSpec::default(), FRatioTrial::new(4.0, 12.0)).expect("valid");
        assert!((c.geometry.backfocus_mm - 100.0).abs() < 1e-12);
        assert!(c.constraints.pass, "reasons: {:?}", c.constraints.reasons);
    }

    #[test]
    fn test_edge_field_traced() {
        let c = generate(&InputSpec::default(), FRatioTrial::new(4.0, 12.0)).expect("valid");
        let simulation = c.simulation.expect("simulation payload");
        assert_eq!(simulation.fields.len(), 2);
        assert!(simulation.fields[1].spot.n_hits >= 3);
        assert!(c.image_quality.wfe_rms_waves_edge.is_finite());
        assert!(c.image_quality.strehl_estimate > 0.0 && c.image_quality.strehl_estimate <= 1.0);
    }

    #[test]
    fn test_wide_field_spot_excludes_stray_light() {
        let mut spec = InputSpec::default();
        spec.field.field_radius = Length::mm(40.0);
        let c = generate(&spec, FRatioTrial::new(3.0, 10.0)).expect("valid");
        let simulation = c.simulation.expect("simulation payload");
        let edge = &simulation.fields[1];

        let imaged = edge
            .rays
            .iter()
            .filter(|p| p.sensor_hit.is_some() && p.reflections == 2)
            .count();
        assert_eq!(edge.spot.n_hits, imaged);
        assert!(imaged >= 3, "imaged = {imaged}");
        assert!(edge.spot.rms_radius < 0.5, "edge rms = {} mm", edge.spot.rms_radius);
        assert!(c.image_quality.coma_waves < 100.0, "coma = {}", c.image_quality.coma_waves);
    }

    #[test]
    fn test_equal_f_ratios_rejected() {
        assert!(generate(&InputSpec::default(), FRatioTrial::new(4.0, 4.0)).is_none());
    }
}
