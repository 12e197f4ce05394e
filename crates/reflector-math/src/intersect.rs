// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Intersection and Reflection
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ray-surface intersection and specular reflection.
//!
//! Planes are solved in closed form. Conics are solved with Newton-Raphson on
//! f(t) = z(t) − z0 − sign · s(r(t)), seeded at the crossing of the vertex plane.

use crate::surface::{conic_sag, conic_slope_over_r, within_aperture};
use reflector_types::constants::{NEWTON_MAX_ITER, NEWTON_MIN_DERIVATIVE, NEWTON_TOLERANCE};
use reflector_types::optics::{ConicSurface, PlaneSurface, Surface};
use reflector_types::vec3::Vec3;

/// Half-line origin + t · direction, t ≥ 0. Direction is kept unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Ray {
            origin,
            direction: direction.normalized(),
        }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub t: f64,
    pub point: Vec3,
}

/// Closed-form plane intersection with aperture clipping.
pub fn intersect_plane(plane: &PlaneSurface, ray: &Ray) -> Option<Hit> {
    let n = plane.normal;
    let denom = ray.direction.dot(n);
    if !denom.is_finite() || denom.abs() < 1e-15 {
        return None;
    }
    let t = (plane.point - ray.origin).dot(n) / denom;
    if !t.is_finite() || t < 0.0 {
        return None;
    }
    let point = ray.at(t);
    let rho = (point - plane.point).norm();
    if !within_aperture(&plane.aperture, rho) {
        return None;
    }
    Some(Hit { t, point })
}

/// Newton-Raphson conic intersection with aperture clipping.
///
/// Fails when the ray leaves the conic's real-sag domain, the derivative
/// degenerates, `t` goes non-finite, or the iteration cap is reached.
pub fn intersect_conic(c: &ConicSurface, ray: &Ray) -> Option<Hit> {
    let o = ray.origin;
    let d = ray.direction;
    let sign = c.sag_sign.value();

    let mut t = if d.z.abs() > 1e-15 {
        (c.z0 - o.z) / d.z
    } else {
        0.0
    };
    if !t.is_finite() || t < 0.0 {
        t = 0.0;
    }

    let mut converged = false;
    for _ in 0..NEWTON_MAX_ITER {
        let p = ray.at(t);
        let r2 = p.x * p.x + p.y * p.y;
        let sag = conic_sag(c.radius, c.conic, r2);
        let g = conic_slope_over_r(c.radius, c.conic, r2);
        if !sag.is_finite() || !g.is_finite() {
            return None;
        }

        let f = p.z - c.z0 - sign * sag;
        // d(sag)/dt = s'(r) · dr/dt = g · (x dx + y dy)
        let df = d.z - sign * g * (p.x * d.x + p.y * d.y);
        if !df.is_finite() || df.abs() < NEWTON_MIN_DERIVATIVE {
            return None;
        }

        let step = f / df;
        t -= step;
        if !t.is_finite() {
            return None;
        }
        if step.abs() < NEWTON_TOLERANCE {
            converged = true;
            break;
        }
    }

    if !converged || t < 0.0 {
        return None;
    }
    let point = ray.at(t);
    if !within_aperture(&c.aperture, point.radial()) {
        return None;
    }
    Some(Hit { t, point })
}

/// Intersect any surface.
pub fn intersect(surface: &Surface, ray: &Ray) -> Option<Hit> {
    match surface {
        Surface::Conic(c) => intersect_conic(c, ray),
        Surface::Plane(p) => intersect_plane(p, ray),
    }
}

/// Specular reflection d' = d − 2 (d·n) n for unit `d` and `n`.
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    let d = direction.normalized();
    let n = normal.normalized();
    (d - n * (2.0 * d.dot(n))).normalized()
}
