// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{MM_PER_INCH, RELAXED_MAX_TUBE_MM};
use crate::error::{ReflectorError, ReflectorResult};
use crate::optics::SampleSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "mm")]
    Mm,
    #[serde(rename = "inch")]
    Inch,
}

impl LengthUnit {
    /// Convert a millimetre value into this unit.
    pub fn from_mm(self, mm: f64) -> f64 {
        match self {
            LengthUnit::Mm => mm,
            LengthUnit::Inch => mm / MM_PER_INCH,
        }
    }
}

/// A user-facing length carrying its display unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    pub value: f64,
    #[serde(default)]
    pub unit: LengthUnit,
}

impl Length {
    pub fn mm(value: f64) -> Self {
        Length {
            value,
            unit: LengthUnit::Mm,
        }
    }

    pub fn inch(value: f64) -> Self {
        Length {
            value,
            unit: LengthUnit::Inch,
        }
    }

    pub fn to_mm(self) -> f64 {
        match self.unit {
            LengthUnit::Mm => self.value,
            LengthUnit::Inch => self.value * MM_PER_INCH,
        }
    }
}

/// Reflecting telescope family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignKind {
    Newtonian,
    Cassegrain,
    Sct,
    RitcheyChretien,
}

impl DesignKind {
    pub const ALL: [DesignKind; 4] = [
        DesignKind::Newtonian,
        DesignKind::Cassegrain,
        DesignKind::Sct,
        DesignKind::RitcheyChretien,
    ];

    /// Folded designs sweep the system f-ratio independently of the primary.
    pub fn is_folded(self) -> bool {
        !matches!(self, DesignKind::Newtonian)
    }
}

impl fmt::Display for DesignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DesignKind::Newtonian => "Newtonian",
            DesignKind::Cassegrain => "Cassegrain",
            DesignKind::Sct => "Schmidt-Cassegrain",
            DesignKind::RitcheyChretien => "Ritchey-Chretien",
        };
        f.pad(name)
    }
}

/// Inclusive f-ratio range swept by `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FRatioRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_primary_range")]
    pub primary_f_ratio: FRatioRange,
    #[serde(default = "default_system_range")]
    pub system_f_ratio: FRatioRange,
    /// Used as the single system f-ratio when `system_f_ratio` is empty.
    #[serde(default = "default_target_system_f_ratio")]
    pub target_system_f_ratio: f64,
}

fn default_primary_range() -> FRatioRange {
    FRatioRange {
        min: 3.0,
        max: 6.0,
        step: 0.5,
    }
}
fn default_system_range() -> FRatioRange {
    FRatioRange {
        min: 8.0,
        max: 15.0,
        step: 1.0,
    }
}
fn default_target_system_f_ratio() -> f64 {
    10.0
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            primary_f_ratio: default_primary_range(),
            system_f_ratio: default_system_range(),
            target_system_f_ratio: default_target_system_f_ratio(),
        }
    }
}

/// Hard feasibility limits applied by the sweep engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default = "default_max_tube_length")]
    pub max_tube_length: Length,
    #[serde(default = "default_max_obstruction_ratio")]
    pub max_obstruction_ratio: f64,
    #[serde(default = "default_min_backfocus")]
    pub min_backfocus: Length,
}

fn default_max_tube_length() -> Length {
    Length::mm(2000.0)
}
fn default_max_obstruction_ratio() -> f64 {
    0.40
}
fn default_min_backfocus() -> Length {
    Length::mm(100.0)
}

impl Default for Constraints {
    fn default() -> Self {
        Constraints {
            max_tube_length: default_max_tube_length(),
            max_obstruction_ratio: default_max_obstruction_ratio(),
            min_backfocus: default_min_backfocus(),
        }
    }
}

impl Constraints {
    /// Limits no geometrically valid candidate can fail.
    pub fn relaxed() -> Self {
        Constraints {
            max_tube_length: Length::mm(RELAXED_MAX_TUBE_MM),
            max_obstruction_ratio: 1.0,
            min_backfocus: Length::mm(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Added to the optical length to get the tube length.
    #[serde(default = "default_tube_margin")]
    pub tube_margin: Length,
    /// Backfocus the two-mirror solver lays out; `None` uses `constraints.min_backfocus`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backfocus_target: Option<Length>,
}

fn default_tube_margin() -> Length {
    Length::mm(25.0)
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            tube_margin: default_tube_margin(),
            backfocus_target: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Fully illuminated field radius at the focal plane.
    #[serde(default = "default_field_radius")]
    pub field_radius: Length,
}

fn default_field_radius() -> Length {
    Length::mm(10.0)
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            field_radius: default_field_radius(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticsConfig {
    #[serde(default = "default_mirror_reflectivity")]
    pub mirror_reflectivity: f64,
    #[serde(default = "default_corrector_transmission")]
    pub corrector_transmission: f64,
}

fn default_mirror_reflectivity() -> f64 {
    0.92
}
fn default_corrector_transmission() -> f64 {
    0.90
}

impl Default for OpticsConfig {
    fn default() -> Self {
        OpticsConfig {
            mirror_reflectivity: default_mirror_reflectivity(),
            corrector_transmission: default_corrector_transmission(),
        }
    }
}

/// Linear weights of the score terms; need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_light_weight")]
    pub light: f64,
    #[serde(default = "default_aberration_weight")]
    pub aberration: f64,
    #[serde(default = "default_obstruction_weight")]
    pub obstruction: f64,
}

fn default_light_weight() -> f64 {
    1.0
}
fn default_aberration_weight() -> f64 {
    1.0
}
fn default_obstruction_weight() -> f64 {
    0.5
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            light: default_light_weight(),
            aberration: default_aberration_weight(),
            obstruction: default_obstruction_weight(),
        }
    }
}

/// Empirically feasible f-ratio ranges found by limit inference.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedLimits {
    pub primary_f_ratio_min: Option<f64>,
    pub primary_f_ratio_max: Option<f64>,
    pub system_f_ratio_min: Option<f64>,
    pub system_f_ratio_max: Option<f64>,
    pub feasible_trials: usize,
}

/// Complete user request for a design sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_aperture")]
    pub aperture: Length,
    #[serde(default = "default_design_kinds")]
    pub design_kinds: Vec<DesignKind>,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub optics: OpticsConfig,
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default)]
    pub sample: SampleSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_limits: Option<DerivedLimits>,
}

fn default_name() -> String {
    "untitled".into()
}
fn default_aperture() -> Length {
    Length::inch(8.0)
}
fn default_design_kinds() -> Vec<DesignKind> {
    DesignKind::ALL.to_vec()
}

impl Default for InputSpec {
    fn default() -> Self {
        InputSpec {
            name: default_name(),
            aperture: default_aperture(),
            design_kinds: default_design_kinds(),
            sweep: SweepConfig::default(),
            constraints: Constraints::default(),
            layout: LayoutConfig::default(),
            field: FieldConfig::default(),
            optics: OpticsConfig::default(),
            weights: ScoreWeights::default(),
            sample: SampleSpec::default(),
            derived_limits: None,
        }
    }
}

fn require_finite(name: &str, value: f64) -> ReflectorResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ReflectorError::ConfigError(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> ReflectorResult<()> {
    require_finite(name, value)?;
    if value < 0.0 {
        return Err(ReflectorError::ConfigError(format!(
            "{name} must be >= 0, got {value}"
        )));
    }
    Ok(())
}

fn require_unit_fraction(name: &str, value: f64) -> ReflectorResult<()> {
    require_finite(name, value)?;
    if value <= 0.0 || value > 1.0 {
        return Err(ReflectorError::ConfigError(format!(
            "{name} must be in (0, 1], got {value}"
        )));
    }
    Ok(())
}

fn require_finite_range(name: &str, range: &FRatioRange) -> ReflectorResult<()> {
    require_finite(&format!("{name}.min"), range.min)?;
    require_finite(&format!("{name}.max"), range.max)?;
    require_finite(&format!("{name}.step"), range.step)
}

impl InputSpec {
    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> ReflectorResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse from a JSON string and validate.
    pub fn from_json(json: &str) -> ReflectorResult<Self> {
        let spec: Self = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Boundary shape check.
    ///
    /// Empty or inverted f-ratio ranges and a non-positive aperture are
    /// legal: they simply produce no candidates.
    pub fn validate(&self) -> ReflectorResult<()> {
        require_finite("aperture", self.aperture.value)?;
        require_finite_range("sweep.primary_f_ratio", &self.sweep.primary_f_ratio)?;
        require_finite_range("sweep.system_f_ratio", &self.sweep.system_f_ratio)?;
        require_finite(
            "sweep.target_system_f_ratio",
            self.sweep.target_system_f_ratio,
        )?;

        require_non_negative(
            "constraints.max_tube_length",
            self.constraints.max_tube_length.value,
        )?;
        require_non_negative(
            "constraints.max_obstruction_ratio",
            self.constraints.max_obstruction_ratio,
        )?;
        require_non_negative(
            "constraints.min_backfocus",
            self.constraints.min_backfocus.value,
        )?;
        require_non_negative("layout.tube_margin", self.layout.tube_margin.value)?;
        if let Some(target) = self.layout.backfocus_target {
            require_non_negative("layout.backfocus_target", target.value)?;
        }
        require_non_negative("field.field_radius", self.field.field_radius.value)?;

        require_unit_fraction("optics.mirror_reflectivity", self.optics.mirror_reflectivity)?;
        require_unit_fraction(
            "optics.corrector_transmission",
            self.optics.corrector_transmission,
        )?;

        require_non_negative("weights.light", self.weights.light)?;
        require_non_negative("weights.aberration", self.weights.aberration)?;
        require_non_negative("weights.obstruction", self.weights.obstruction)?;

        if self.sample.pupil.steps == 0 {
            return Err(ReflectorError::ConfigError(
                "sample.pupil.steps must be >= 1".to_string(),
            ));
        }
        if self.sample.max_bounces == 0 {
            return Err(ReflectorError::ConfigError(
                "sample.max_bounces must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn aperture_mm(&self) -> f64 {
        self.aperture.to_mm()
    }

    pub fn field_radius_mm(&self) -> f64 {
        self.field.field_radius.to_mm()
    }

    pub fn tube_margin_mm(&self) -> f64 {
        self.layout.tube_margin.to_mm()
    }

    /// Backfocus the two-mirror layout is solved for [mm].
    pub fn design_backfocus_mm(&self) -> f64 {
        self.layout
            .backfocus_target
            .unwrap_or(self.constraints.min_backfocus)
            .to_mm()
    }

    /// Enabled design kinds; an empty list means every kind.
    pub fn enabled_kinds(&self) -> Vec<DesignKind> {
        if self.design_kinds.is_empty() {
            DesignKind::ALL.to_vec()
        } else {
            self.design_kinds.clone()
        }
    }

    /// Generation-time copy: checks relaxed, layout backfocus pinned.
    pub fn relaxed(&self) -> InputSpec {
        let mut relaxed = self.clone();
        relaxed.layout.backfocus_target = Some(Length::mm(self.design_backfocus_mm()));
        relaxed.constraints = Constraints::relaxed();
        relaxed
    }
}
