//! Reading plan parsing, validation and preview
//!
//! Text flows through [`parse_reading_plan`] into a [`Plan`], which
//! [`validate_plan`] checks and [`format_plan_preview`] summarises.

mod content;
mod model;
mod parser;
mod preview;
mod validate;
mod verse;

pub use content::{parse_content_line, parse_time_directive, ContentLine};
pub use model::{LocalizedText, Plan, PlanType, Section, SectionContent, Topic, STORE_PREFIX};
pub use parser::{parse_multilingual, parse_reading_plan};
pub use preview::{format_plan_preview, PreviewFormatter};
pub use validate::{validate_plan, ValidationReport, Validator};
pub use verse::{parse_verse, VerseReference, WHOLE_CHAPTER_END_VERSE};
