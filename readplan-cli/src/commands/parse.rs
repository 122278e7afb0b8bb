//! Parse command - print a plan as JSON

use clap::Args;
use std::path::PathBuf;

use super::load_plan;

/// Parse a plan file and print the result as JSON
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Path to plan file
    pub file: PathBuf,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}

impl ParseArgs {
    /// Execute the parse command
    pub fn execute(&self) -> anyhow::Result<()> {
        let plan = load_plan(&self.file)?;

        println!("{}", plan.to_json(self.pretty)?);

        Ok(())
    }
}
