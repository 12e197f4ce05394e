// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Reflector Math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Geometric kernel for the reflector design engine.
//!
//! Plane bases, conic sag and normals, ray-surface intersection and reflection.

pub mod geometry;
pub mod intersect;
pub mod surface;
