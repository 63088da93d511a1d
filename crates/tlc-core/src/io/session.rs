use std::path::Path;

use tracing::debug;

use crate::annotation::AnnotationSet;
use crate::error::Result;
use crate::pipeline::config::PipelineConfig;

/// Load an annotation session file (TOML).
///
/// Points are `[x, y]` pairs; integer pixel coordinates are accepted.
pub fn load_session(path: &Path) -> Result<AnnotationSet> {
    let contents = std::fs::read_to_string(path)?;
    let set: AnnotationSet = toml::from_str(&contents)?;
    set.validate()?;
    debug!(path = %path.display(), plates = set.len(), "Loaded session");
    Ok(set)
}

pub fn save_session(set: &AnnotationSet, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(set)?;
    std::fs::write(path, contents)?;
    debug!(path = %path.display(), plates = set.len(), "Saved session");
    Ok(())
}

/// Load a pipeline config file (TOML). Missing sections take defaults.
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

pub fn save_config(config: &PipelineConfig, path: &Path) -> Result<()> {
    std::fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}
