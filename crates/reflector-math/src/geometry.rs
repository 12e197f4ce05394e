// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Plane bases and in-plane projection.

use reflector_types::vec3::Vec3;

/// Orthonormal in-plane basis (u, v) for a plane with normal `normal`.
///
/// `u` is the projection of `hint` onto the plane, so passing the field-tilt
/// axis makes `u` the tangential direction and `v = n × u` the sagittal one.
/// Falls back to another axis when `hint` is parallel to the normal.
pub fn plane_basis(normal: Vec3, hint: Vec3) -> (Vec3, Vec3) {
    let n = normal.normalized();
    let mut u = hint - n * hint.dot(n);
    if u.norm() < 1e-9 {
        let fallback = if n.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
        u = fallback - n * fallback.dot(n);
    }
    let u = u.normalized();
    let v = n.cross(u);
    (u, v)
}

/// Coordinates of `point` in the (u, v) frame anchored at `origin`.
pub fn project_to_plane(point: Vec3, origin: Vec3, u: Vec3, v: Vec3) -> (f64, f64) {
    let d = point - origin;
    (d.dot(u), d.dot(v))
}
