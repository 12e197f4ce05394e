// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Surface Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Conic sag, slope and normals, plus the shared aperture test.
//!
//! Unsigned sag of a conic with vertex radius R and conic constant K:
//!
//! s(r) = r² / (R · (1 + √(1 − (1+K) r²/R²)))
//!
//! defined only where the radicand is positive.

use reflector_types::optics::{Aperture, ConicSurface, Surface};
use reflector_types::vec3::Vec3;

/// Radicand 1 − (1+K) r²/R².
fn radicand(radius: f64, conic: f64, r2: f64) -> f64 {
    1.0 - (1.0 + conic) * r2 / (radius * radius)
}

/// Unsigned conic sag at squared radius `r2`. NaN outside the conic's domain.
pub fn conic_sag(radius: f64, conic: f64, r2: f64) -> f64 {
    let q = radicand(radius, conic, r2);
    if q <= 0.0 || !radius.is_finite() || radius <= 0.0 {
        return f64::NAN;
    }
    r2 / (radius * (1.0 + q.sqrt()))
}

/// ds/dr divided by r: 1 / (R √q). Multiply by x or y for the partials.
pub fn conic_slope_over_r(radius: f64, conic: f64, r2: f64) -> f64 {
    let q = radicand(radius, conic, r2);
    if q <= 0.0 || !radius.is_finite() || radius <= 0.0 {
        return f64::NAN;
    }
    1.0 / (radius * q.sqrt())
}

/// Height of the conic surface at (x, y).
pub fn conic_height(c: &ConicSurface, x: f64, y: f64) -> f64 {
    c.z0 + c.sag_sign.value() * conic_sag(c.radius, c.conic, x * x + y * y)
}

/// Unit normal of the conic at `p`, pointing towards +z.
pub fn conic_normal(c: &ConicSurface, p: Vec3) -> Vec3 {
    let g = conic_slope_over_r(c.radius, c.conic, p.x * p.x + p.y * p.y);
    let sign = c.sag_sign.value();
    Vec3::new(-sign * g * p.x, -sign * g * p.y, 1.0).normalized()
}

/// Unit normal of any surface at `p`.
pub fn surface_normal(surface: &Surface, p: Vec3) -> Vec3 {
    match surface {
        Surface::Conic(c) => conic_normal(c, p),
        Surface::Plane(plane) => plane.normal.normalized(),
    }
}

/// True when a hit at distance `rho` from the local axis lies in the clear aperture.
pub fn within_aperture(aperture: &Aperture, rho: f64) -> bool {
    rho.is_finite() && rho <= aperture.outer_radius && rho >= aperture.inner_radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflector_types::optics::{Material, SagSign};

    fn paraboloid(focal: f64) -> ConicSurface {
        ConicSurface {
            label: "primary".into(),
            z0: 0.0,
            radius: 2.0 * focal,
            conic: -1.0,
            sag_sign: SagSign::Positive,
            aperture: Aperture::circular(200.0),
            material: Material::Reflector { reflectivity: 1.0 },
        }
    }

    #[test]
    fn test_paraboloid_sag_exact() {
        // Paraboloid: s = r² / 2R exactly.
        let s = conic_sag(2000.0, -1.0, 100.0 * 100.0);
        assert!((s - 10_000.0 / 4000.0).abs() < 1e-12, "s = {s}");
    }

    #[test]
    fn test_sphere_sag_matches_circle() {
        let r_curv: f64 = 500.0;
        let r: f64 = 120.0;
        let expected = r_curv - (r_curv * r_curv - r * r).sqrt();
        let s = conic_sag(r_curv, 0.0, r * r);
        assert!((s - expected).abs() < 1e-10);
    }

    #[test]
    fn test_sag_outside_domain_is_nan() {
        // Sphere of radius 100 has no sag beyond r = 100.
        assert!(conic_sag(100.0, 0.0, 150.0 * 150.0).is_nan());
        assert!(conic_slope_over_r(100.0, 0.0, 150.0 * 150.0).is_nan());
    }

    #[test]
    fn test_hyperboloid_always_defined() {
        assert!(conic_sag(100.0, -4.0, 1.0e6).is_finite());
    }

    #[test]
    fn test_normal_on_axis_is_z() {
        let c = paraboloid(1000.0);
        let n = conic_normal(&c, Vec3::new(0.0, 0.0, 0.0));
        assert!((n.z - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_normal_matches_finite_difference_slope() {
        let c = paraboloid(1000.0);
        let x = 80.0;
        let h = 1e-5;
        let slope = (conic_height(&c, x + h, 0.0) - conic_height(&c, x - h, 0.0)) / (2.0 * h);
        let n = conic_normal(&c, Vec3::new(x, 0.0, conic_height(&c, x, 0.0)));
        assert!((-n.x / n.z - slope).abs() < 1e-8);
    }

    #[test]
    fn test_negative_sag_sign_mirrors_surface() {
        let mut c = paraboloid(1000.0);
        c.sag_sign = SagSign::Negative;
        let z = conic_height(&c, 50.0, 0.0);
        assert!(z < 0.0);
        let n = conic_normal(&c, Vec3::new(50.0, 0.0, z));
        assert!(n.x > 0.0);
    }

    #[test]
    fn test_annular_aperture() {
        let a = Aperture::annular(100.0, 20.0);
        assert!(within_aperture(&a, 50.0));
        assert!(!within_aperture(&a, 10.0));
        assert!(!within_aperture(&a, 100.5));
        assert!(!within_aperture(&a, f64::NAN));
    }
}
