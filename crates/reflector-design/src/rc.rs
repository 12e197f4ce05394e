// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Ritchey-Chrétien Generator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ritchey-Chrétien: two hyperboloids chosen to cancel spherical
//! aberration and coma together.

use crate::generator::FRatioTrial;
use crate::layout::{build_two_mirror, FamilyParams, TwoMirrorLayout};
use reflector_types::config::{DesignKind, InputSpec};
use reflector_types::state::Candidate;

pub const BAFFLE_FACTOR: f64 = 1.10;

/// Aplanatic conic constants for magnification `m` and backfocus ratio β = b/f₁.
pub fn aplanatic_conics(magnification: f64, backfocus_ratio: f64) -> (f64, f64) {
    let m = magnification;
    let beta = backfocus_ratio;
    let k1 = -1.0 - 2.0 * (1.0 + beta) / (m * m * (m - beta));
    let k2 = -((m + 1.0) / (m - 1.0)).powi(2)
        - 2.0 * m * (m + 1.0) / ((m - beta) * (m - 1.0).powi(3));
    (k1, k2)
}

pub fn generate(spec: &InputSpec, trial: FRatioTrial) -> Option<Candidate> {
    let layout = TwoMirrorLayout::from_spec(spec, trial)?;
    let (primary_conic, secondary_conic) =
        aplanatic_conics(layout.magnification, layout.backfocus_ratio());
    if !primary_conic.is_finite() || !secondary_conic.is_finite() {
        return None;
    }
    Some(build_two_mirror(
        spec,
        trial,
        &layout,
        FamilyParams {
            kind: DesignKind::RitcheyChretien,
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
    use crate::layout::classical_conics;

    #[test]
    fn test_conics_steeper_than_classical() {
        let (k1, k2) = aplanatic_conics(3.0, 0.12);
        let (c1, c2) = classical_conics(3.0);
        assert!(k1 < c1, "primary must be hyperbolic, got {k1}");
        assert!(k2 < c2);
    }

    #[test]
    fn test_known_conics() {
        // m = 4, β = 0.25: K1 = −1 − 2.5/(16·3.75), K2 = −(5/3)² − 40/(3.75·27)
        let (k1, k2) = aplanatic_conics(4.0, 0.25);
        assert!((k1 - (-1.0 - 2.5 / 60.0)).abs() < 1e-12);
        assert!((k2 - (-25.0 / 9.0 - 40.0 / 101.25)).abs() < 1e-12);
    }

    #[test]
    fn test_generates_hyperbolic_plan() {
        let c = generate(&InputSpec::default(), FRatioTrial::new(4.0, 9.0)).expect("valid");
        assert_eq!(c.kind, DesignKind::RitcheyChretien);
        let expected = BAFFLE_FACTOR * c.geometry.secondary_diameter_mm;
        assert!((c.geometry.obstruction_diameter_mm - expected).abs() < 1e-9);
        let simulation = c.simulation.expect("simulation payload");
        assert!(simulation.fields[0].spot.n_hits >= 3);
    }
}
