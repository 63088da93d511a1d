use tracing::debug;

use crate::annotation::{Modality, PlateAnnotation, PlateId, Role};
use crate::consts::DISTANCE_DECIMALS;
use crate::error::{Result, TlcError};

/// Round to `decimals` places, resolving exact ties to the even digit.
///
/// Rounding goes through the exact decimal expansion of `value`, so a value
/// whose binary form sits just below a tie (2.675) rounds down instead of
/// being pushed onto the tie by scaling.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Pixels-to-centimeter factor of one capture setup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModalityCalibration {
    pub modality: Modality,
    pub pixels_to_cm: f64,
}

impl ModalityCalibration {
    /// Factors must be finite and strictly positive.
    pub fn new(modality: Modality, pixels_to_cm: f64) -> Result<Self> {
        if !pixels_to_cm.is_finite() || pixels_to_cm <= 0.0 {
            return Err(TlcError::InvalidCalibration {
                modality,
                value: pixels_to_cm,
            });
        }
        Ok(Self {
            modality,
            pixels_to_cm,
        })
    }

    /// Unrounded centimeters for a pixel distance.
    pub fn to_cm(&self, pixels: f64) -> f64 {
        pixels * self.pixels_to_cm
    }

    /// Centimeters rounded to the reporting precision.
    pub fn distance_cm(&self, pixels: f64) -> f64 {
        round_to(self.to_cm(pixels), DISTANCE_DECIMALS)
    }
}

/// Baseline and solvent front of one plate, in one modality's pixel frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceFrame {
    pub baseline_y: f64,
    pub solvent_y: f64,
}

impl ReferenceFrame {
    /// Reads the first baseline and solvent-line points of `annotation`,
    /// or names the reference line that is missing.
    pub fn locate(annotation: &PlateAnnotation) -> std::result::Result<Self, Role> {
        let baseline = annotation.reference(Role::Baseline).ok_or(Role::Baseline)?;
        let solvent = annotation
            .reference(Role::SolventLine)
            .ok_or(Role::SolventLine)?;
        Ok(Self {
            baseline_y: baseline.y,
            solvent_y: solvent.y,
        })
    }

    pub fn from_annotation(
        annotation: &PlateAnnotation,
        plate: PlateId,
        modality: Modality,
    ) -> Result<Self> {
        Self::locate(annotation).map_err(|line| TlcError::MissingReferenceLine {
            plate,
            modality,
            line,
        })
    }

    pub fn solvent_front_px(&self) -> f64 {
        (self.solvent_y - self.baseline_y).abs()
    }

    pub fn distance_from_baseline(&self, y: f64) -> f64 {
        (y - self.baseline_y).abs()
    }
}

/// Ratio between primary and secondary solvent-front pixel distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactor {
    pub value: f64,
    /// Set when the secondary distance was zero and 1.0 was substituted.
    pub fallback: bool,
}

pub fn scaling_factor(primary_px: f64, secondary_px: f64) -> ScaleFactor {
    if secondary_px > 0.0 {
        ScaleFactor {
            value: primary_px / secondary_px,
            fallback: false,
        }
    } else {
        ScaleFactor {
            value: 1.0,
            fallback: true,
        }
    }
}

/// Maps y-coordinates from a secondary capture into the primary frame.
///
/// Both baselines are assumed to mark the same physical plate edge; this
/// holds only if the caller paired the right plates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossModalityMap {
    primary_baseline_y: f64,
    secondary_baseline_y: f64,
    scale: ScaleFactor,
}

impl CrossModalityMap {
    pub fn new(primary: &ReferenceFrame, secondary: &ReferenceFrame) -> Self {
        let scale = scaling_factor(primary.solvent_front_px(), secondary.solvent_front_px());
        debug!(
            factor = scale.value,
            fallback = scale.fallback,
            "Cross-modality scaling factor"
        );
        Self {
            primary_baseline_y: primary.baseline_y,
            secondary_baseline_y: secondary.baseline_y,
            scale,
        }
    }

    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    pub fn remap_y(&self, secondary_y: f64) -> f64 {
        self.primary_baseline_y + self.scale.value * (secondary_y - self.secondary_baseline_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_ties_to_even() {
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(0.35, 1), 0.3);
        assert_eq!(round_to(-0.25, 1), -0.2);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.625, 2), 0.62);
        assert_eq!(round_to(1.25, 1), 1.2);
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(18.400000000000002, 1), 18.4);
    }

    #[test]
    fn rejects_non_positive_factor() {
        assert!(ModalityCalibration::new(Modality::Uv, 0.0).is_err());
        assert!(ModalityCalibration::new(Modality::Uv, f64::NAN).is_err());
        assert!(ModalityCalibration::new(Modality::Uv, 0.046).is_ok());
    }
}
