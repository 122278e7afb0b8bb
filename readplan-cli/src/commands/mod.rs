//! CLI command implementations

pub mod export;
pub mod parse;
pub mod preview;
pub mod validate;

pub use export::ExportArgs;
pub use parse::ParseArgs;
pub use preview::PreviewArgs;
pub use validate::ValidateArgs;

use std::path::Path;

use anyhow::Context;
use readplan_core::{parse_reading_plan, Plan};

/// Read and parse a plan file
pub(crate) fn load_plan(file: &Path) -> anyhow::Result<Plan> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let plan = parse_reading_plan(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    tracing::debug!(file = %file.display(), id = %plan.id, "loaded plan");
    Ok(plan)
}
