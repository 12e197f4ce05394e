// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::config::DesignKind;
use crate::optics::OpticalPlan;
use crate::vec3::Vec3;
use serde::{Deserialize, Serialize};

/// One traced ray: its straight segments and where it landed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayPath {
    pub segments: Vec<(Vec3, Vec3)>,
    pub sensor_hit: Option<Vec3>,
    /// Product of reflectivities and transmissions met along the way.
    pub throughput: f64,
    /// Mirror reflections before the path ended.
    #[serde(default)]
    pub reflections: usize,
}

/// Centroid-referenced spot statistics in the sensor's local (u, v) basis.
/// u is the tangential direction, v the sagittal one. All NaN below 3 hits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotStats {
    pub n_hits: usize,
    pub centroid_u: f64,
    pub centroid_v: f64,
    pub rms_radius: f64,
    pub rms_tangential: f64,
    pub rms_sagittal: f64,
}

impl SpotStats {
    pub fn degenerate(n_hits: usize) -> Self {
        SpotStats {
            n_hits,
            centroid_u: f64::NAN,
            centroid_v: f64::NAN,
            rms_radius: f64::NAN,
            rms_tangential: f64::NAN,
            rms_sagittal: f64::NAN,
        }
    }
}

/// Best-focus result for one field angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResult {
    pub field_angle: f64,
    /// Sensor shift along its normal at best focus [mm]; NaN if no plane had a finite RMS.
    pub focus_offset: f64,
    pub spot: SpotStats,
    pub rays: Vec<RayPath>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub fields: Vec<FieldResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateInputs {
    pub aperture_mm: f64,
    pub primary_f_ratio: f64,
    pub system_f_ratio: f64,
    pub primary_focal_length_mm: f64,
    pub system_focal_length_mm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryMetrics {
    pub tube_length_mm: f64,
    pub backfocus_mm: f64,
    /// Primary-to-secondary (or diagonal) separation along the axis.
    pub mirror_spacing_mm: f64,
    pub secondary_diameter_mm: f64,
    pub obstruction_diameter_mm: f64,
    pub obstruction_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroughputMetrics {
    pub primary_area_mm2: f64,
    pub effective_area_mm2: f64,
    pub usable_light_efficiency: f64,
    pub mirror_count: u32,
    pub transmission_factor: f64,
}

/// Diffraction-normalised spot proxies. Waves terms are RMS / Airy radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageQualityMetrics {
    pub field_angle: f64,
    pub coma_waves: f64,
    pub astigmatism_waves: f64,
    pub field_curvature_mm: f64,
    pub spherical_waves: f64,
    pub wfe_rms_waves_edge: f64,
    pub strehl_estimate: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstraintResult {
    pub pass: bool,
    pub reasons: Vec<String>,
}

impl ConstraintResult {
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        ConstraintResult {
            pass: reasons.is_empty(),
            reasons,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub light: f64,
    pub aberration: f64,
    pub obstruction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
}

/// Batch-wide WFE normalisation bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBounds {
    pub min_wfe_rms: f64,
    pub max_wfe_rms: f64,
}

impl Default for ScoreBounds {
    fn default() -> Self {
        ScoreBounds {
            min_wfe_rms: 0.0,
            max_wfe_rms: 1.0,
        }
    }
}

/// One evaluated design trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub kind: DesignKind,
    pub inputs: CandidateInputs,
    pub geometry: GeometryMetrics,
    pub throughput: ThroughputMetrics,
    pub image_quality: ImageQualityMetrics,
    pub constraints: ConstraintResult,
    /// `None` until the scoring pass.
    pub score: Option<ScoreResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<OpticalPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationResult>,
}

impl Candidate {
    /// Score total, or -inf for an unscored candidate.
    pub fn total_score(&self) -> f64 {
        self.score.map_or(f64::NEG_INFINITY, |s| s.total)
    }

    /// Copy without the plan and simulation payload.
    pub fn without_payload(&self) -> Candidate {
        Candidate {
            plan: None,
            simulation: None,
            ..self.clone()
        }
    }
}

/// Highest-scoring passing candidate of each family.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BestByKind {
    pub newtonian: Option<Candidate>,
    pub cassegrain: Option<Candidate>,
    pub sct: Option<Candidate>,
    pub ritchey_chretien: Option<Candidate>,
}

impl BestByKind {
    pub fn get(&self, kind: DesignKind) -> Option<&Candidate> {
        self.slot(kind).as_ref()
    }

    pub fn slot_mut(&mut self, kind: DesignKind) -> &mut Option<Candidate> {
        match kind {
            DesignKind::Newtonian => &mut self.newtonian,
            DesignKind::Cassegrain => &mut self.cassegrain,
            DesignKind::Sct => &mut self.sct,
            DesignKind::RitcheyChretien => &mut self.ritchey_chretien,
        }
    }

    fn slot(&self, kind: DesignKind) -> &Option<Candidate> {
        match kind {
            DesignKind::Newtonian => &self.newtonian,
            DesignKind::Cassegrain => &self.cassegrain,
            DesignKind::Sct => &self.sct,
            DesignKind::RitcheyChretien => &self.ritchey_chretien,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SweepResult {
    /// Every generated candidate, passing or not, in enumeration order.
    pub candidates: Vec<Candidate>,
    /// Passing candidates, score descending.
    pub ranked: Vec<Candidate>,
    pub best_overall: Option<Candidate>,
    pub best_by_kind: BestByKind,
    pub top: Vec<Candidate>,
}

impl SweepResult {
    /// Result for a sweep where nothing passed.
    pub fn empty(candidates: Vec<Candidate>) -> Self {
        SweepResult {
            candidates,
            ..SweepResult::default()
        }
    }

    pub fn passing_count(&self) -> usize {
        self.ranked.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_result_pass_iff_no_reasons() {
        assert!(ConstraintResult::from_reasons(vec![]).pass);
        let failed = ConstraintResult::from_reasons(vec!["too long".into()]);
        assert!(!failed.pass);
        assert_eq!(failed.reasons.len(), 1);
    }

    #[test]
    fn test_default_bounds_unit_interval() {
        let b = ScoreBounds::default();
        assert_eq!(b.min_wfe_rms, 0.0);
        assert_eq!(b.max_wfe_rms, 1.0);
    }

    #[test]
    fn test_degenerate_spot_is_nan() {
        let s = SpotStats::degenerate(2);
        assert_eq!(s.n_hits, 2);
        assert!(s.rms_radius.is_nan());
        assert!(s.rms_tangential.is_nan());
    }

    #[test]
    fn test_empty_sweep_result() {
        let r = SweepResult::empty(Vec::new());
        assert!(r.ranked.is_empty());
        assert!(r.best_overall.is_none());
        assert!(r.best_by_kind.get(DesignKind::Sct).is_none());
        assert_eq!(r.passing_count(), 0);
    }
}
