// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Image Quality Adapter
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Aberration proxies from spot RMS, in units of the Airy radius.
//!
//! These are geometric stand-ins, not wavefront analysis: "waves" here means
//! RMS spot radius divided by 1.22 λ F at λ = 550 nm.

use reflector_types::constants::{AIRY_COEFFICIENT, WAVELENGTH_MM};
use reflector_types::state::{FieldResult, ImageQualityMetrics};
use std::f64::consts::PI;

/// Airy disk radius [mm] at the design wavelength. NaN for invalid F.
pub fn airy_radius(f_ratio: f64) -> f64 {
    if !f_ratio.is_finite() || f_ratio <= 0.0 {
        return f64::NAN;
    }
    AIRY_COEFFICIENT * WAVELENGTH_MM * f_ratio
}

/// Strehl-like estimate exp(−(2π·σ)²) with σ in waves.
pub fn strehl_estimate(wfe_waves: f64) -> f64 {
    (-(2.0 * PI * wfe_waves).powi(2)).exp()
}

/// Build image-quality metrics for a candidate.
///
/// `edge` is the outermost field result, `on_axis` the zero-field one when
/// it was traced. Every metric that depends on a missing or non-finite
/// input comes out NaN.
pub fn adapt(
    edge: &FieldResult,
    system_f_ratio: f64,
    on_axis: Option<&FieldResult>,
) -> ImageQualityMetrics {
    let airy = airy_radius(system_f_ratio);

    let coma_waves = edge.spot.rms_radius / airy;
    let spherical_waves = on_axis.map_or(f64::NAN, |f| f.spot.rms_radius / airy);
    let astigmatism_waves = (edge.spot.rms_tangential - edge.spot.rms_sagittal).abs() / airy;
    let field_curvature_mm = edge.focus_offset.abs();

    let wfe_rms_waves_edge = if coma_waves.is_nan() || spherical_waves.is_nan() {
        f64::NAN
    } else {
        coma_waves.max(spherical_waves)
    };

    ImageQualityMetrics {
        field_angle: edge.field_angle,
        coma_waves,
        astigmatism_waves,
        field_curvature_mm,
        spherical_waves,
        wfe_rms_waves_edge,
        strehl_estimate: strehl_estimate(coma_waves),
    }
}
