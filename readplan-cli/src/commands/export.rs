//! Export command - write the JSON copy kept in the plan store

use anyhow::Context;
use clap::Args;
use readplan_core::{Config, Validator};
use std::path::{Path, PathBuf};

use super::load_plan;

/// Write a validated plan under `<out-dir>/readingPlans/available/<id>.json`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Path to plan file
    pub file: PathBuf,

    /// Root directory of the exported store
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Replace an existing export with the same id
    #[arg(long)]
    pub force: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let plan = load_plan(&self.file)?;

        let report = Validator::from_config(&config.validation).validate(&plan);
        if !report.valid {
            for err in &report.errors {
                println!("  ❌ {}", err);
            }
            anyhow::bail!("refusing to export invalid plan {}", plan.id);
        }

        if !is_safe_id(&plan.id) {
            anyhow::bail!("plan id {:?} cannot be used as a file name", plan.id);
        }

        let target = export_path(&self.out_dir, &plan.store_key());
        if target.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to replace it)",
                target.display()
            );
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = plan.to_json(true)?;
        std::fs::write(&target, json)
            .with_context(|| format!("Failed to write {}", target.display()))?;

        tracing::info!(id = %plan.id, path = %target.display(), "exported plan");
        println!("Exported {} to {}", plan.id, target.display());
        Ok(())
    }
}

fn export_path(out_dir: &Path, store_key: &str) -> PathBuf {
    out_dir.join(format!("{}.json", store_key))
}

/// Ids become file names, so they must stay a single path component
fn is_safe_id(id: &str) -> bool {
    !id.contains(['/', '\\']) && id != "." && id != ".."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_path() {
        let path = export_path(Path::new("/tmp/store"), "readingPlans/available/nt-90");
        assert_eq!(
            path,
            PathBuf::from("/tmp/store/readingPlans/available/nt-90.json")
        );
    }

    #[test]
    fn test_dotted_id_keeps_full_name() {
        let path = export_path(Path::new("out"), "readingPlans/available/nt.90");
        assert_eq!(path.file_name().unwrap(), "nt.90.json");
    }

    #[test]
    fn test_unsafe_ids() {
        assert!(is_safe_id("nt-90"));
        assert!(!is_safe_id("../etc"));
        assert!(!is_safe_id(".."));
        assert!(!is_safe_id("a\\b"));
    }
}
