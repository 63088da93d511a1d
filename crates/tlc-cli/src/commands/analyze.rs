use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tlc_core::annotation::{AnnotationSet, Modality};
use tlc_core::io::{load_config, load_session, save_csv};
use tlc_core::pipeline::config::PipelineConfig;
use tlc_core::pipeline::run_batch_reported;

use crate::progress::BarReporter;
use crate::summary::{print_analysis_summary, print_report};

#[derive(Clone, Copy, ValueEnum)]
pub enum ModalityArg {
    Uv,
    Stain,
}

impl From<ModalityArg> for Modality {
    fn from(arg: ModalityArg) -> Self {
        match arg {
            ModalityArg::Uv => Modality::Uv,
            ModalityArg::Stain => Modality::Stain,
        }
    }
}

/// Config file plus command-line overrides, shared by every command that
/// builds a `PipelineConfig`.
#[derive(Args)]
pub struct AnalysisConfigArgs {
    /// Analysis config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Modality whose frame and calibration the results are expressed in
    #[arg(long, value_enum)]
    pub primary: Option<ModalityArg>,

    /// UV pixels-to-cm factor
    #[arg(long)]
    pub uv_scale: Option<f64>,

    /// Stain pixels-to-cm factor
    #[arg(long)]
    pub stain_scale: Option<f64>,

    /// Spots closer than this many pixels are merged
    #[arg(long)]
    pub pixel_tolerance: Option<f64>,

    /// Components closer than this many centimeters are merged
    #[arg(long)]
    pub cm_tolerance: Option<f64>,
}

impl AnalysisConfigArgs {
    /// Load the config file (or defaults) and apply the flags on top.
    pub fn resolve(&self) -> Result<PipelineConfig> {
        let mut config = match self.config {
            Some(ref path) => load_config(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(primary) = self.primary {
            config.primary = primary.into();
        }
        if let Some(uv) = self.uv_scale {
            config.calibration.uv = uv;
        }
        if let Some(stain) = self.stain_scale {
            config.calibration.stain = stain;
        }
        if let Some(px) = self.pixel_tolerance {
            config.dedup.pixel_tolerance = px;
        }
        if let Some(cm) = self.cm_tolerance {
            config.dedup.distance_tolerance_cm = cm;
        }
        Ok(config)
    }
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Annotation session file (TOML)
    pub session: PathBuf,

    #[command(flatten)]
    pub analysis: AnalysisConfigArgs,

    /// Write one row per component to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let config = args.analysis.resolve()?;
    let set = load_session(&args.session)
        .with_context(|| format!("Failed to load session {}", args.session.display()))?;
    analyze_set(&set, &config, &args.session, args.csv.as_deref())
}

/// Run the batch over `set`, print the report and optionally export CSV.
pub fn analyze_set(
    set: &AnnotationSet,
    config: &PipelineConfig,
    source: &Path,
    csv: Option<&Path>,
) -> Result<()> {
    print_analysis_summary(config, source, set.len());

    let reporter = Arc::new(BarReporter::new()?);
    let report = run_batch_reported(set, config, reporter).context("Analysis failed")?;
    print_report(&report);

    if let Some(path) = csv {
        save_csv(&report.results, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Results saved to {}", path.display());
    }

    Ok(())
}
