//! Validate command

use clap::Args;
use readplan_core::{Config, Validator};
use std::path::PathBuf;

use super::load_plan;

/// Check a plan file
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to plan file
    pub file: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    ///
    /// Fails when the plan has any validation error.
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let plan = load_plan(&self.file)?;
        let report = Validator::from_config(&config.validation).validate(&plan);

        if report.valid {
            println!(
                "✅ {} is valid ({} sections)",
                self.file.display(),
                plan.sections.len()
            );
            return Ok(());
        }

        println!(
            "❌ {} has {} problem(s):",
            self.file.display(),
            report.errors.len()
        );
        for err in &report.errors {
            println!("  - {}", err);
        }

        anyhow::bail!("validation failed for {}", self.file.display())
    }
}
