use serde::{Deserialize, Serialize};

/// Settings of an annotation capture session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Predefined plate labels in annotation order, typically the solvent
    /// system of each plate. When non-empty, no more plates than labels
    /// can be started.
    #[serde(default)]
    pub plate_labels: Vec<String>,
}
