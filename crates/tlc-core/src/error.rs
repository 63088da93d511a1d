use thiserror::Error;

use crate::annotation::{Modality, PlateId, Role};
use crate::capture::CaptureError;

#[derive(Error, Debug)]
pub enum TlcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{plate} {modality} image is missing its {line}")]
    MissingReferenceLine {
        plate: PlateId,
        modality: Modality,
        line: Role,
    },

    #[error("{plate} {modality} solvent front coincides with the baseline")]
    DegenerateCalibration { plate: PlateId, modality: Modality },

    #[error("Invalid calibration for {modality}: {value} cm/px")]
    InvalidCalibration { modality: Modality, value: f64 },

    #[error("Duplicate plate id: {0}")]
    DuplicatePlate(PlateId),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Key script line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TlcError>;
