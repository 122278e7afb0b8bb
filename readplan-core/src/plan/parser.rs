//! Reading plan text parser
//!
//! ```text
//! ---
//! id: gospels-30
//! name: [en] Gospels | [de] Evangelien
//! type: thematic
//! ---
//! # [en] Jesus | [de] Jesus
//! ## [en] Birth | [de] Geburt
//! 40:1-2; 42:1:1-80 (/1W)
//! ```
//!
//! The first `---` block is the header; everything after it is content.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use tracing::{debug, info};

use super::content::{parse_content_line, ContentLine};
use super::model::{LocalizedText, Plan, PlanType, Section, SectionContent, Topic};
use crate::error::ParseError;
use crate::Result;

const DELIMITER: &str = "---";

static LANGUAGE_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([A-Za-z0-9_]{2})\]\s*(.+)").expect("valid language pattern")
});

/// Header fields, before the name is split into languages
#[derive(Debug, Default)]
struct Header {
    id: Option<String>,
    name: Option<String>,
    plan_type: Option<String>,
}

impl Header {
    fn parse(block: &str) -> Self {
        let mut header = Header::default();

        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim().to_string();
            match key.trim() {
                "id" => header.id = Some(value),
                "name" => header.name = Some(value),
                "type" => header.plan_type = Some(value),
                _ => {}
            }
        }

        header
    }

    fn require(
        field: Option<String>,
        name: &'static str,
    ) -> std::result::Result<String, ParseError> {
        field
            .filter(|v| !v.is_empty())
            .ok_or(ParseError::MissingField(name))
    }
}

/// Where the scan is within the section/topic nesting
///
/// `InTopic` means the last topic of the held section is open.
#[derive(Debug, Default)]
enum ScanState {
    #[default]
    NoSection,
    InSection(Section),
    InTopic(Section),
}

impl ScanState {
    fn into_section(self) -> Option<Section> {
        match self {
            ScanState::NoSection => None,
            ScanState::InSection(s) | ScanState::InTopic(s) => Some(s),
        }
    }
}

/// Builds the section list line by line
struct Scanner<'a> {
    plan_type: &'a PlanType,
    sections: Vec<Section>,
    state: ScanState,
}

impl<'a> Scanner<'a> {
    fn new(plan_type: &'a PlanType) -> Self {
        Self {
            plan_type,
            sections: Vec::new(),
            state: ScanState::NoSection,
        }
    }

    fn open_section(&mut self, title: &str) {
        if let Some(section) = std::mem::take(&mut self.state).into_section() {
            self.sections.push(section);
        }
        debug!(title, "opening section");
        self.state = ScanState::InSection(Section::new(parse_multilingual(title)));
    }

    fn open_topic(&mut self, title: &str, line_no: usize) {
        self.state = match std::mem::take(&mut self.state) {
            ScanState::NoSection => {
                debug!(line_no, "topic before any section, dropped");
                ScanState::NoSection
            }
            ScanState::InSection(mut section) | ScanState::InTopic(mut section) => {
                debug!(title, "opening topic");
                section.topics.push(Topic::new(parse_multilingual(title)));
                ScanState::InTopic(section)
            }
        };
    }

    fn add_content(&mut self, line: ContentLine, line_no: usize) {
        let (section, in_topic) = match &mut self.state {
            ScanState::NoSection => {
                debug!(line_no, "content before any section, dropped");
                return;
            }
            ScanState::InSection(section) => (section, false),
            ScanState::InTopic(section) => (section, true),
        };

        match self.plan_type {
            PlanType::Category => {
                if section.content.is_some() {
                    debug!(line_no, "section already has a book range, line ignored");
                } else if let Some(first) = line.references.first() {
                    section.content = Some(SectionContent::BookRange(*first));
                }
            }
            PlanType::Thematic => match section.topics.last_mut() {
                Some(topic) if in_topic => topic.verses.extend(line.references),
                _ => debug!(line_no, "thematic content outside a topic, dropped"),
            },
            PlanType::Chronological => match section.topics.last_mut() {
                Some(topic) if in_topic => {
                    topic.verses.extend(line.references);
                    if line.duration.is_some() {
                        topic.duration = line.duration;
                    }
                }
                _ if section.content.is_none() => {
                    section.content = Some(SectionContent::Verses(line.references));
                    section.duration = line.duration;
                }
                _ => debug!(line_no, "section already has verses, line ignored"),
            },
            PlanType::Unknown(kind) => {
                debug!(line_no, kind = %kind, "unknown plan type, content ignored");
            }
        }
    }

    fn finish(self) -> Vec<Section> {
        let mut sections = self.sections;
        if let Some(section) = self.state.into_section() {
            sections.push(section);
        }
        sections
    }
}

/// Split `[xx] Text | [yy] Text` into text per language
///
/// Segments without a `[xx]` tag are skipped; a repeated code keeps the
/// last text.
pub fn parse_multilingual(text: &str) -> LocalizedText {
    text.split('|')
        .filter_map(|segment| {
            let caps = LANGUAGE_SEGMENT.captures(segment.trim())?;
            Some((caps[1].to_string(), caps[2].trim().to_string()))
        })
        .collect()
}

/// Parse plan text into a [`Plan`]
///
/// Stops at the first malformed header or content line.
pub fn parse_reading_plan(text: &str) -> Result<Plan> {
    let blocks: Vec<&str> = text
        .split(DELIMITER)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect();

    if blocks.len() < 2 {
        return Err(ParseError::Format.into());
    }

    let header = Header::parse(blocks[0]);
    let id = Header::require(header.id, "id")?;
    let name = Header::require(header.name, "name")?;
    let plan_type = PlanType::from(Header::require(header.plan_type, "type")?);

    let content = blocks[1..].join(DELIMITER);
    let mut scanner = Scanner::new(&plan_type);

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        let line_no = idx + 1;

        if line.is_empty() {
            continue;
        }

        if let Some(title) = line.strip_prefix("## ") {
            scanner.open_topic(title, line_no);
        } else if let Some(title) = line.strip_prefix("# ") {
            scanner.open_section(title);
        } else {
            let parsed = parse_content_line(line)?;
            scanner.add_content(parsed, line_no);
        }
    }

    let sections = scanner.finish();
    info!(id = %id, plan_type = %plan_type, sections = sections.len(), "parsed reading plan");

    Ok(Plan {
        id,
        name: parse_multilingual(&name),
        plan_type,
        sections,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::verse::VerseReference;
    use crate::Error;

    const THEMATIC: &str = r#"---
id: love-30
name: [de] Liebe | [en] Love
type: thematic
---
# [de] Gottes Liebe | [en] God's Love
## [de] Gnade | [en] Grace
43:3:16; 45:5:8
62:4:7-21 (/1W)
## [de] Treue | [en] Faithfulness
25:3:22-23
# [de] Nächstenliebe | [en] Neighbour
## [de] Gebot | [en] Command
03:19:18
"#;

    fn parse_err(text: &str) -> ParseError {
        match parse_reading_plan(text) {
            Err(Error::Parse(e)) => e,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_header() {
        let plan = parse_reading_plan(THEMATIC).unwrap();
        assert_eq!(plan.id, "love-30");
        assert_eq!(plan.plan_type, PlanType::Thematic);
        assert_eq!(plan.name.get("de"), Some("Liebe"));
        assert_eq!(plan.name.get("en"), Some("Love"));
    }

    #[test]
    fn test_parse_sections_and_topics() {
        let plan = parse_reading_plan(THEMATIC).unwrap();
        assert_eq!(plan.sections.len(), 2);
        assert_eq!(plan.sections[0].title.get("en"), Some("God's Love"));
        assert_eq!(plan.sections[0].topics.len(), 2);
        assert_eq!(plan.sections[0].topics[0].verses.len(), 3);
        assert_eq!(plan.sections[0].topics[1].verses.len(), 1);
        assert_eq!(plan.sections[1].title.get("de"), Some("Nächstenliebe"));
        assert_eq!(plan.sections[1].topics[0].title.get("en"), Some("Command"));
    }

    #[test]
    fn test_thematic_ignores_duration_and_section_content() {
        let plan = parse_reading_plan(THEMATIC).unwrap();
        assert_eq!(plan.sections[0].topics[0].duration, None);
        assert!(plan.sections[0].content.is_none());
    }

    #[test]
    fn test_multilingual_parsing() {
        let text = parse_multilingual("[de] Hallo | [en] Hello");
        assert_eq!(text.len(), 2);
        assert_eq!(text.get("de"), Some("Hallo"));
        assert_eq!(text.get("en"), Some("Hello"));
    }

    #[test]
    fn test_multilingual_skips_untagged_and_keeps_last_duplicate() {
        let text = parse_multilingual("Plain | [en] One | [english] x | [en] Two");
        assert_eq!(text.len(), 1);
        assert_eq!(text.get("en"), Some("Two"));
    }

    #[test]
    fn test_multilingual_codes_are_ascii_only() {
        let text = parse_multilingual("[日本] Hallo | [éé] Yo | [en] Hi");
        assert_eq!(text.languages().collect::<Vec<_>>(), vec!["en"]);
        assert_eq!(text.get("en"), Some("Hi"));
    }

    #[test]
    fn test_missing_delimiters() {
        assert_eq!(parse_err("id: x\nname: [en] X\ntype: category"), ParseError::Format);
        assert_eq!(parse_err("---\nid: x\n---\n"), ParseError::Format);
    }

    #[test]
    fn test_missing_type() {
        let err = parse_reading_plan("---\nid: x\nname: [en] X\n---\n# [en] A\n01\n").unwrap_err();
        assert!(err.to_string().contains("type"));
        assert!(err.to_string().starts_with("Parse error: "));
    }

    #[test]
    fn test_empty_header_value_is_missing() {
        assert_eq!(
            parse_err("---\nid:\nname: [en] X\ntype: category\n---\n# [en] A\n"),
            ParseError::MissingField("id")
        );
    }

    #[test]
    fn test_header_value_keeps_later_colons() {
        let plan =
            parse_reading_plan("---\nid: a:b\nname: [en] X: Y\ntype: category\n---\n# [en] A\n01\n")
                .unwrap();
        assert_eq!(plan.id, "a:b");
        assert_eq!(plan.name.get("en"), Some("X: Y"));
    }

    #[test]
    fn test_delimiter_inside_content_is_rejoined() {
        let text = "---\nid: x\nname: [en] X\ntype: category\n---\n# [en] A --- B\n01\n";
        let plan = parse_reading_plan(text).unwrap();
        assert_eq!(plan.sections.len(), 1);
        assert_eq!(plan.sections[0].title.get("en"), Some("A---B"));
        assert_eq!(
            plan.sections[0].book_range(),
            Some(&VerseReference::Book { book: 1 })
        );
    }

    #[test]
    fn test_category_first_line_wins() {
        let text = "---\nid: c\nname: [en] C\ntype: category\n---\n# [en] Law\n01-05\n06\n";
        let plan = parse_reading_plan(text).unwrap();
        assert_eq!(
            plan.sections[0].book_range(),
            Some(&VerseReference::BookRange {
                start_book: 1,
                end_book: 5
            })
        );
        assert!(plan.sections[0].verses().is_empty());
    }

    #[test]
    fn test_chronological_flat_section() {
        let text = "---\nid: c\nname: [en] C\ntype: chronological\n---\n# [en] Day 1\n01:1-3; 19:1 (/2D)\n01:4\n";
        let plan = parse_reading_plan(text).unwrap();
        let section = &plan.sections[0];
        assert_eq!(section.verses().len(), 2);
        assert_eq!(section.duration, Some(2));
        assert!(section.book_range().is_none());
        assert!(section.topics.is_empty());
    }

    #[test]
    fn test_chronological_topics_accumulate() {
        let text = "---\nid: c\nname: [en] C\ntype: chronological\n---\n# [en] Week 1\n## [en] Creation\n01:1 (/1D)\n01:2 (/3D)\n01:3\n";
        let plan = parse_reading_plan(text).unwrap();
        let topic = &plan.sections[0].topics[0];
        assert_eq!(topic.verses.len(), 3);
        assert_eq!(topic.duration, Some(3));
        assert!(plan.sections[0].content.is_none());
    }

    #[test]
    fn test_topic_before_section_is_dropped() {
        let text = "---\nid: t\nname: [en] T\ntype: thematic\n---\n## [en] Orphan\n01\n# [en] A\n## [en] B\n02\n";
        let plan = parse_reading_plan(text).unwrap();
        assert_eq!(plan.sections.len(), 1);
        assert_eq!(plan.sections[0].topics.len(), 1);
        assert_eq!(plan.sections[0].topics[0].title.get("en"), Some("B"));
    }

    #[test]
    fn test_thematic_content_without_topic_is_dropped() {
        let text = "---\nid: t\nname: [en] T\ntype: thematic\n---\n# [en] A\n01\n## [en] B\n02\n";
        let plan = parse_reading_plan(text).unwrap();
        assert_eq!(plan.sections[0].topics[0].verses, vec![VerseReference::Book { book: 2 }]);
    }

    #[test]
    fn test_invalid_verse_aborts_parse() {
        let text = "---\nid: t\nname: [en] T\ntype: thematic\n---\n# [en] A\n## [en] B\nJohn 3:16\n";
        assert_eq!(
            parse_err(text),
            ParseError::VerseFormat("John 3:16".to_string())
        );
    }

    #[test]
    fn test_unknown_type_parses_without_content() {
        let text = "---\nid: u\nname: [en] U\ntype: weekly\n---\n# [en] A\n01\n";
        let plan = parse_reading_plan(text).unwrap();
        assert_eq!(plan.plan_type, PlanType::Unknown("weekly".to_string()));
        assert_eq!(plan.sections.len(), 1);
        assert!(plan.sections[0].content.is_none());
    }
}
