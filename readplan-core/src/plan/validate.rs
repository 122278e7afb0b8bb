//! Plan validation
//!
//! Every check runs; failures are collected rather than returned early so
//! an author sees the whole list at once.

use serde::Serialize;
use tracing::debug;

use super::model::Plan;
use crate::config::ValidationConfig;

/// Outcome of validating a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Structural and language-coverage checks
#[derive(Debug, Clone)]
pub struct Validator {
    /// Distinct title languages a plan must use
    pub min_languages: usize,
    /// Languages named when coverage falls short
    pub required_languages: Vec<String>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::from_config(&ValidationConfig::default())
    }
}

impl Validator {
    pub fn from_config(config: &ValidationConfig) -> Self {
        Self {
            min_languages: config.min_languages,
            required_languages: config.required_languages.clone(),
        }
    }

    pub fn validate(&self, plan: &Plan) -> ValidationReport {
        let mut errors = Vec::new();

        if plan.id.is_empty() {
            errors.push("Plan id is required".to_string());
        }

        if plan.name.is_empty() {
            errors.push("Plan name needs at least one language".to_string());
        }

        if !plan.plan_type.is_known() {
            errors.push(format!(
                "Invalid plan type: {} (expected category, thematic or chronological)",
                plan.plan_type
            ));
        }

        if plan.sections.is_empty() {
            errors.push("Plan must have at least one section".to_string());
        }

        // Only the count is checked, not which codes are present
        let languages = plan.title_languages();
        if languages.len() < self.min_languages {
            let found: Vec<&str> = languages.into_iter().collect();
            errors.push(format!(
                "Insufficient language coverage: found {} ({}), required: {}",
                found.len(),
                found.join(", "),
                self.required_languages.join(", ")
            ));
        }

        debug!(id = %plan.id, errors = errors.len(), "validated plan");
        ValidationReport::from_errors(errors)
    }
}

/// Validate with the default thresholds
pub fn validate_plan(plan: &Plan) -> ValidationReport {
    Validator::default().validate(plan)
}
