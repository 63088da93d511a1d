use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tlc_core::capture::replay_script;
use tlc_core::io::save_session;

use super::analyze::{analyze_set, AnalysisConfigArgs};

#[derive(Args)]
pub struct ReplayArgs {
    /// Key script (n, b, s, o, t, q, click X Y; one per line)
    pub script: PathBuf,

    /// Session file to write
    #[arg(short, long, default_value = "session.toml")]
    pub output: PathBuf,

    /// Analyze the captured session right away
    #[arg(long)]
    pub analyze: bool,

    /// Write one row per component to a CSV file (with --analyze)
    #[arg(long, requires = "analyze")]
    pub csv: Option<PathBuf>,

    #[command(flatten)]
    pub analysis: AnalysisConfigArgs,
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let config = args.analysis.resolve()?;
    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;

    let set = replay_script(&source, config.primary, &config.capture)
        .with_context(|| format!("Replay of {} failed", args.script.display()))?;
    save_session(&set, &args.output)
        .with_context(|| format!("Failed to write session {}", args.output.display()))?;
    println!(
        "Captured {} plate(s), session saved to {}",
        set.len(),
        args.output.display()
    );

    if args.analyze {
        analyze_set(&set, &config, &args.script, args.csv.as_deref())?;
    }
    Ok(())
}
