//! Human-readable plan summaries

use std::fmt::Write;

use super::model::{LocalizedText, Plan};
use super::verse::VerseReference;
use crate::config::PreviewConfig;

const UNTITLED: &str = "(untitled)";

/// Renders a plan as indented plain text
#[derive(Debug, Clone)]
pub struct PreviewFormatter {
    /// Display language preference, most wanted first
    pub languages: Vec<String>,
    /// List every reference under its section or topic
    pub list_references: bool,
}

impl Default for PreviewFormatter {
    fn default() -> Self {
        Self::from_config(&PreviewConfig::default())
    }
}

impl PreviewFormatter {
    pub fn from_config(config: &PreviewConfig) -> Self {
        Self {
            languages: config.languages.clone(),
            list_references: false,
        }
    }

    pub fn with_references(mut self, list: bool) -> Self {
        self.list_references = list;
        self
    }

    fn title<'a>(&self, text: &'a LocalizedText) -> &'a str {
        text.preferred(self.languages.as_slice()).unwrap_or(UNTITLED)
    }

    pub fn format(&self, plan: &Plan) -> String {
        let mut out = String::new();
        let _ = self.write_plan(&mut out, plan);
        out
    }

    fn write_plan(&self, out: &mut String, plan: &Plan) -> std::fmt::Result {
        writeln!(out, "Plan: {} ({})", self.title(&plan.name), plan.id)?;
        writeln!(out, "Type: {}", plan.plan_type)?;
        writeln!(out, "Sections: {}", plan.sections.len())?;

        for (i, section) in plan.sections.iter().enumerate() {
            writeln!(out)?;
            writeln!(out, "{}. {}", i + 1, self.title(&section.title))?;
            if let Some(range) = section.book_range() {
                writeln!(out, "   Books: {}", book_summary(range))?;
            }
            writeln!(out, "   References: {}", section.verses().len())?;
            self.write_references(out, section.verses(), "     ")?;
            if let Some(days) = section.duration {
                writeln!(out, "   Duration: {}", days_label(days))?;
            }

            for topic in &section.topics {
                writeln!(out, "   - {}", self.title(&topic.title))?;
                writeln!(out, "     References: {}", topic.verses.len())?;
                self.write_references(out, &topic.verses, "       ")?;
                if let Some(days) = topic.duration {
                    writeln!(out, "     Duration: {}", days_label(days))?;
                }
            }
        }

        Ok(())
    }

    fn write_references(
        &self,
        out: &mut String,
        refs: &[VerseReference],
        indent: &str,
    ) -> std::fmt::Result {
        if self.list_references {
            for r in refs {
                writeln!(out, "{}{}", indent, r)?;
            }
        }
        Ok(())
    }
}

fn book_summary(range: &VerseReference) -> String {
    match *range {
        VerseReference::BookRange {
            start_book,
            end_book,
        } => format!("{:02}-{:02}", start_book, end_book),
        VerseReference::Book { book } => format!("{:02}", book),
        ref other => other.to_string(),
    }
}

fn days_label(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Format a plan with the default language preference (English, then German)
pub fn format_plan_preview(plan: &Plan) -> String {
    PreviewFormatter::default().format(plan)
}
