use std::fmt;

use serde::{Deserialize, Serialize};

use crate::annotation::Modality;
use crate::calibration::ModalityCalibration;
use crate::capture::CaptureConfig;
use crate::consts::{
    DEFAULT_DISTANCE_TOLERANCE_CM, DEFAULT_PIXEL_TOLERANCE, DEFAULT_STAIN_PIXELS_TO_CM,
    DEFAULT_UV_PIXELS_TO_CM,
};
use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Modality whose frame and calibration all results are expressed in.
    #[serde(default)]
    pub primary: Modality,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub dedup: DedupConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
}

impl PipelineConfig {
    pub fn secondary(&self) -> Modality {
        self.primary.other()
    }
}

/// Pixels-to-centimeter factor per modality. Camera distance and zoom
/// differ between capture setups, so each modality has its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    #[serde(default = "default_uv")]
    pub uv: f64,
    #[serde(default = "default_stain")]
    pub stain: f64,
}

fn default_uv() -> f64 {
    DEFAULT_UV_PIXELS_TO_CM
}
fn default_stain() -> f64 {
    DEFAULT_STAIN_PIXELS_TO_CM
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            uv: DEFAULT_UV_PIXELS_TO_CM,
            stain: DEFAULT_STAIN_PIXELS_TO_CM,
        }
    }
}

impl CalibrationConfig {
    pub fn pixels_to_cm(&self, modality: Modality) -> f64 {
        match modality {
            Modality::Uv => self.uv,
            Modality::Stain => self.stain,
        }
    }

    pub fn for_modality(&self, modality: Modality) -> Result<ModalityCalibration> {
        ModalityCalibration::new(modality, self.pixels_to_cm(modality))
    }
}

/// Tolerances of the two dedup passes. Both are inclusive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Pixel-domain pass over merged spot y-coordinates.
    #[serde(default = "default_pixel_tolerance")]
    pub pixel_tolerance: f64,
    /// Centimeter-domain pass over computed component distances.
    #[serde(default = "default_distance_tolerance")]
    pub distance_tolerance_cm: f64,
}

fn default_pixel_tolerance() -> f64 {
    DEFAULT_PIXEL_TOLERANCE
}
fn default_distance_tolerance() -> f64 {
    DEFAULT_DISTANCE_TOLERANCE_CM
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            pixel_tolerance: DEFAULT_PIXEL_TOLERANCE,
            distance_tolerance_cm: DEFAULT_DISTANCE_TOLERANCE_CM,
        }
    }
}

impl fmt::Display for DedupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} px / {} cm",
            self.pixel_tolerance, self.distance_tolerance_cm
        )
    }
}
