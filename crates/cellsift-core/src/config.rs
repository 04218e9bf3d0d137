use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CLAMP_MAX, DEFAULT_CLAMP_MIN, DEFAULT_LABEL_FONT_SIZE, DEFAULT_TRACE_HEIGHT,
    MAX_ZOOM, MIN_ZOOM, OUTLINE_SCALE, OUTLINE_STROKE_WIDTH, WHEEL_DEGREES_PER_STEP,
    ZOOM_STEP_FACTOR,
};
use crate::error::{CurationError, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CurationConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub project: ProjectLayout,
}

impl CurationConfig {
    /// Read a TOML config file and validate it. Missing sections and keys
    /// take their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CurationConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the overlay or zoom unusable.
    pub fn validate(&self) -> Result<()> {
        let d = &self.display;
        let z = &self.zoom;
        positive("display.outline_scale", d.outline_scale)?;
        positive("display.outline_width", d.outline_width)?;
        positive("display.label_font_size", d.label_font_size)?;
        positive("display.trace_height", d.trace_height)?;
        positive("zoom.step_factor", z.step_factor)?;
        positive("zoom.wheel_degrees_per_step", z.wheel_degrees_per_step)?;

        if z.step_factor >= 1.0 {
            return Err(CurationError::Config(format!(
                "zoom.step_factor must be in (0, 1), got {}",
                z.step_factor
            )));
        }
        check_range("zoom clamp range", z.clamp_min, z.clamp_max)?;
        check_range("zoom limits", z.min_zoom, z.max_zoom)?;
        Ok(())
    }
}

/// Finite and strictly positive.
fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CurationError::Config(format!(
            "{name} must be a finite positive number, got {value}"
        )))
    }
}

/// `[min, max]` must be finite, positive and contain 1.0.
fn check_range(name: &str, min: f32, max: f32) -> Result<()> {
    if min.is_finite() && max.is_finite() && 0.0 < min && min <= 1.0 && 1.0 <= max {
        Ok(())
    } else {
        Err(CurationError::Config(format!(
            "{name} [{min}, {max}] must contain 1.0 and stay finite and positive"
        )))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Multiplier from image pixels to scene units for outlines and labels.
    pub outline_scale: f32,
    pub outline_width: f32,
    pub label_font_size: f32,
    /// Height of one trace panel in points.
    pub trace_height: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            outline_scale: OUTLINE_SCALE,
            outline_width: OUTLINE_STROKE_WIDTH,
            label_font_size: DEFAULT_LABEL_FONT_SIZE,
            trace_height: DEFAULT_TRACE_HEIGHT,
        }
    }
}

/// How repeated zoom steps accumulate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomPolicy {
    /// Each step multiplies the view by a growing factor; reversing direction
    /// restarts the factor at 1.0.
    #[default]
    Rebaseline,
    /// The factor is an absolute zoom level held inside `[clamp_min, clamp_max]`.
    Clamp,
}

impl fmt::Display for ZoomPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoomPolicy::Rebaseline => write!(f, "Rebaseline"),
            ZoomPolicy::Clamp => write!(f, "Clamp"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub step_factor: f32,
    pub policy: ZoomPolicy,
    pub clamp_min: f32,
    pub clamp_max: f32,
    /// Bounds on the total zoom relative to the fitted view.
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub wheel_degrees_per_step: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            step_factor: ZOOM_STEP_FACTOR,
            policy: ZoomPolicy::default(),
            clamp_min: DEFAULT_CLAMP_MIN,
            clamp_max: DEFAULT_CLAMP_MAX,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            wheel_degrees_per_step: WHEEL_DEGREES_PER_STEP,
        }
    }
}

/// Where the input files live inside a project directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    pub data_subdir: PathBuf,
    pub projection_pattern: String,
    pub traces_pattern: String,
    pub props_pattern: String,
    pub contours_pattern: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            data_subdir: PathBuf::from("InscopixProcessing").join("DataAnalysis"),
            projection_pattern: "*HD*MAX_PROJ*.tiff".into(),
            traces_pattern: "*TRACES*.csv".into(),
            props_pattern: "*props*.csv".into(),
            contours_pattern: "*contours*.json".into(),
        }
    }
}
