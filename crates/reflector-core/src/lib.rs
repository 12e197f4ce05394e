// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Reflector Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ray-bundle simulation and image-quality evaluation.
//!
//! `simulator` traces pupil-sampled bundles through an optical plan and finds
//! best focus per field angle; `image_quality` turns spot sizes into
//! diffraction-normalised aberration proxies.

pub mod image_quality;
pub mod simulator;
