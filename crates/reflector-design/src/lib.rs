// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Reflector Design
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Telescope design-space search.
//!
//! Generators turn an [`InputSpec`](reflector_types::config::InputSpec) and an
//! f-ratio trial into a simulated [`Candidate`](reflector_types::state::Candidate);
//! the sweep engine enumerates trials, applies constraints and ranks the
//! passing candidates.

pub mod cassegrain;
pub mod constraints;
pub mod generator;
pub mod layout;
pub mod newtonian;
pub mod rc;
pub mod scoring;
pub mod sct;
pub mod sweep;

pub use generator::{generate, FRatioTrial};
pub use sweep::{infer_derived_limits, run_sweep};
