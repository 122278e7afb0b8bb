//! Reading plan data model

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::verse::VerseReference;
use crate::Result;

/// Logical store prefix under which uploaded plans are kept
pub const STORE_PREFIX: &str = "readingPlans/available";

/// Text keyed by two-letter language code
///
/// Ordered by language code so previews and JSON output are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Language codes present, in code order
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Pick the text of the first preferred language present
    ///
    /// Falls back to the first entry by language code, so any non-empty
    /// text yields something.
    pub fn preferred<S: AsRef<str>>(&self, languages: &[S]) -> Option<&str> {
        languages
            .iter()
            .find_map(|lang| self.get(lang.as_ref()))
            .or_else(|| self.0.values().next().map(String::as_str))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Kind of plan, which decides how content lines are attached
///
/// Unrecognized header values are kept verbatim so the validator can
/// report them instead of the parser rejecting the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlanType {
    /// One whole-book span per section
    Category,
    /// Sections of topics, each holding verse references
    Thematic,
    /// References in reading order, with optional durations
    Chronological,
    /// Anything else found in the header
    Unknown(String),
}

impl PlanType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Category => "category",
            Self::Thematic => "thematic",
            Self::Chronological => "chronological",
            Self::Unknown(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for PlanType {
    fn from(s: &str) -> Self {
        match s {
            "category" => Self::Category,
            "thematic" => Self::Thematic,
            "chronological" => Self::Chronological,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for PlanType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<PlanType> for String {
    fn from(t: PlanType) -> Self {
        match t {
            PlanType::Unknown(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content attached directly to a section
///
/// A section holds a book range or a verse list, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionContent {
    /// Whole-book span of a category plan
    BookRange(VerseReference),
    /// References of a chronological section without topics
    Verses(Vec<VerseReference>),
}

/// A top-level grouping within a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: LocalizedText,
    pub topics: Vec<Topic>,
    #[serde(flatten)]
    pub content: Option<SectionContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl Section {
    pub fn new(title: LocalizedText) -> Self {
        Self {
            title,
            topics: Vec::new(),
            content: None,
            duration: None,
        }
    }

    pub fn book_range(&self) -> Option<&VerseReference> {
        match &self.content {
            Some(SectionContent::BookRange(r)) => Some(r),
            _ => None,
        }
    }

    /// References held directly by the section (empty for book ranges)
    pub fn verses(&self) -> &[VerseReference] {
        match &self.content {
            Some(SectionContent::Verses(v)) => v,
            _ => &[],
        }
    }
}

/// A subsection holding verse references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub title: LocalizedText,
    pub verses: Vec<VerseReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl Topic {
    pub fn new(title: LocalizedText) -> Self {
        Self {
            title,
            verses: Vec::new(),
            duration: None,
        }
    }
}

/// A parsed reading plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: LocalizedText,
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    pub sections: Vec<Section>,
    /// When the plan text was parsed
    pub created_at: DateTime<Utc>,
}

impl Plan {
    /// Path of this plan in the shared plan store
    pub fn store_key(&self) -> String {
        format!("{}/{}", STORE_PREFIX, self.id)
    }

    /// JSON copy of the plan as stored under [`Plan::store_key`]
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Every language code used by a section or topic title
    pub fn title_languages(&self) -> std::collections::BTreeSet<&str> {
        self.sections
            .iter()
            .flat_map(|s| {
                s.title
                    .languages()
                    .chain(s.topics.iter().flat_map(|t| t.title.languages()))
            })
            .collect()
    }
}
