// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Reference wavelength for diffraction normalisation [mm] (550 nm).
pub const WAVELENGTH_MM: f64 = 550.0e-6;

/// Airy first-dark-ring coefficient: r = 1.22 λ F.
pub const AIRY_COEFFICIENT: f64 = 1.22;

/// Newton iteration cap for conic intersection.
pub const NEWTON_MAX_ITER: usize = 40;

/// |df/dt| below this is treated as a degenerate Newton step.
pub const NEWTON_MIN_DERIVATIVE: f64 = 1e-12;

/// Newton step size [mm] at which the intersection is considered converged.
pub const NEWTON_TOLERANCE: f64 = 1e-10;

/// Minimum ray parameter [mm] for a hit to count during propagation.
/// Keeps a ray from re-hitting the surface it just left.
pub const SELF_HIT_EPS: f64 = 1e-6;

/// Focus search half-width in steps (window is ±N, i.e. 2N+1 planes).
pub const FOCUS_HALF_STEPS: i32 = 4;

/// Minimum focus search step [mm].
pub const FOCUS_MIN_STEP_MM: f64 = 0.5;

/// Focus step as a fraction of the nominal image distance.
pub const FOCUS_STEP_FRACTION: f64 = 1e-4;

/// Fewer sensor hits than this yields a NaN spot RMS.
pub const MIN_SPOT_HITS: usize = 3;

/// Floating-point slack on the inclusive upper bound of an f-ratio range.
pub const RANGE_EPS: f64 = 1e-12;

/// Convex obstruction penalty coefficient: 1 - (o + c·o²).
pub const OBSTRUCTION_PENALTY: f64 = 0.15;

/// Tube length used by the relaxed generation-time constraints [mm].
pub const RELAXED_MAX_TUBE_MM: f64 = 1e12;
