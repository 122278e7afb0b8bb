//! Readplan Core - parsing and validation of Bible reading plans
//!
//! Reading plans are hand-authored text files with a small header and a
//! body of sections, topics and verse references. This crate turns that
//! text into a [`Plan`], checks it with [`validate_plan`] and renders a
//! summary with [`format_plan_preview`].

pub mod config;
pub mod error;
pub mod plan;

pub use config::Config;
pub use error::{Error, ParseError, Result};
pub use plan::{
    format_plan_preview, parse_content_line, parse_multilingual, parse_reading_plan,
    parse_time_directive, parse_verse, validate_plan, ContentLine, LocalizedText, Plan,
    PlanType, PreviewFormatter, Section, SectionContent, Topic, ValidationReport, Validator,
    VerseReference,
};
