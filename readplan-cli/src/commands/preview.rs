//! Preview command

use clap::Args;
use readplan_core::{Config, PreviewFormatter};
use std::path::PathBuf;

use super::load_plan;

/// Print a readable summary of a plan file
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Path to plan file
    pub file: PathBuf,
}

impl PreviewArgs {
    /// Execute the preview command
    ///
    /// Verbose mode also lists every reference.
    pub fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let plan = load_plan(&self.file)?;
        let formatter = PreviewFormatter::from_config(&config.preview).with_references(verbose);

        print!("{}", formatter.format(&plan));
        Ok(())
    }
}
