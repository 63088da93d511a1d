use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tlc_core::io::load_session;

use crate::summary::print_session_info;

#[derive(Args)]
pub struct InfoArgs {
    /// Annotation session file (TOML)
    pub session: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let set = load_session(&args.session)
        .with_context(|| format!("Failed to load session {}", args.session.display()))?;
    print_session_info(&set, &args.session);
    Ok(())
}
