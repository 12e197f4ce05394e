// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Schmidt-Cassegrain Generator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Schmidt-Cassegrain: Cassegrain layout behind a front corrector plate.
//!
//! The corrector is modelled as a thin transmitting window: it costs
//! throughput but leaves ray directions unchanged. The larger baffle factor
//! accounts for the secondary housing mounted in the plate.

use crate::generator::FRatioTrial;
use crate::layout::{build_two_mirror, classical_conics, FamilyParams, TwoMirrorLayout};
use reflector_types::config::{DesignKind, InputSpec};
use reflector_types::state::Candidate;

pub const BAFFLE_FACTOR: f64 = 1.15;

pub fn generate(spec: &InputSpec, trial: FRatioTrial) -> Option<Candidate> {
    let layout = TwoMirrorLayout::from_spec(spec, trial)?;
    let (primary_conic, secondary_conic) = classical_conics(layout.magnification);
    Some(build_two_mirror(
        spec,
        trial,
        &layout,
        FamilyParams {
            kind: DesignKind::Sct,
            baffle_factor: BAFFLE_FACTOR,
            primary_conic,
            secondary_conic,
            corrector_transmission: Some(spec.optics.corrector_transmission),
        },
    ))
}
