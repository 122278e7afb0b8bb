//! Verse reference grammar
//!
//! A reference names a span of scripture by canonical book number (1-66,
//! always written with two digits), chapter and verse:
//!
//! | Text          | Reference                                   |
//! |---------------|---------------------------------------------|
//! | `01-05`       | books 1 through 5                           |
//! | `41`          | the whole of book 41                        |
//! | `40:28`       | all of chapter 28                           |
//! | `19:119:1-5`  | verses 1-5 of chapter 119                   |
//! | `01:1:1-5:2`  | chapter 1 verse 1 through chapter 2 verse 5 |
//! | `41:1-16`     | chapters 1 through 16                       |

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// End verse recorded for whole-chapter references
///
/// Consumers cap it to the real length of the chapter.
pub const WHOLE_CHAPTER_END_VERSE: u32 = 999;

static BOOK_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})-([0-9]{2})$").expect("valid book range pattern"));
static BOOK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})$").expect("valid book pattern"));
static WHOLE_CHAPTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2}):([0-9]+)$").expect("valid chapter pattern"));
static SPECIFIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2}):([0-9]+):([0-9]+)(?:-([0-9]+)?)?(?::([0-9]+))?$")
        .expect("valid specific pattern")
});
static CHAPTER_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2}):([0-9]+)-([0-9]+)$").expect("valid chapter range pattern")
});

/// A span of scripture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum VerseReference {
    /// Whole books from `start_book` through `end_book`
    BookRange { start_book: u8, end_book: u8 },
    /// One whole book
    Book { book: u8 },
    /// Verses `start_verse..=end_verse`, ending in `end_chapter` when set
    Specific {
        book: u8,
        chapter: u32,
        start_verse: u32,
        end_verse: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_chapter: Option<u32>,
    },
    /// Whole chapters of one book
    ChapterRange {
        book: u8,
        start_chapter: u32,
        end_chapter: u32,
    },
}

impl VerseReference {
    /// True for the `BB:C` shorthand
    pub fn is_whole_chapter(&self) -> bool {
        matches!(
            self,
            Self::Specific {
                start_verse: 1,
                end_verse: WHOLE_CHAPTER_END_VERSE,
                end_chapter: None,
                ..
            }
        )
    }
}

impl fmt::Display for VerseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::BookRange {
                start_book,
                end_book,
            } => write!(f, "{:02}-{:02}", start_book, end_book),
            Self::Book { book } => write!(f, "{:02}", book),
            Self::Specific { book, chapter, .. } if self.is_whole_chapter() => {
                write!(f, "{:02}:{}", book, chapter)
            }
            Self::Specific {
                book,
                chapter,
                start_verse,
                end_verse,
                end_chapter,
            } => {
                write!(f, "{:02}:{}:{}", book, chapter, start_verse)?;
                if end_verse != start_verse || end_chapter.is_some() {
                    write!(f, "-{}", end_verse)?;
                }
                if let Some(end_chapter) = end_chapter {
                    write!(f, ":{}", end_chapter)?;
                }
                Ok(())
            }
            Self::ChapterRange {
                book,
                start_chapter,
                end_chapter,
            } => write!(f, "{:02}:{}-{}", book, start_chapter, end_chapter),
        }
    }
}

/// Parse one reference segment
///
/// Rules are tried in a fixed order: book range, book, whole chapter,
/// verse span, chapter range. The first match wins.
pub fn parse_verse(segment: &str) -> Result<VerseReference, ParseError> {
    let segment = segment.trim();
    let invalid = || ParseError::VerseFormat(segment.to_string());

    if let Some(caps) = BOOK_RANGE.captures(segment) {
        return Ok(VerseReference::BookRange {
            start_book: number(&caps, 1).ok_or_else(invalid)?,
            end_book: number(&caps, 2).ok_or_else(invalid)?,
        });
    }

    if let Some(caps) = BOOK.captures(segment) {
        return Ok(VerseReference::Book {
            book: number(&caps, 1).ok_or_else(invalid)?,
        });
    }

    if let Some(caps) = WHOLE_CHAPTER.captures(segment) {
        return Ok(VerseReference::Specific {
            book: number(&caps, 1).ok_or_else(invalid)?,
            chapter: number(&caps, 2).ok_or_else(invalid)?,
            start_verse: 1,
            end_verse: WHOLE_CHAPTER_END_VERSE,
            end_chapter: None,
        });
    }

    if let Some(caps) = SPECIFIC.captures(segment) {
        let start_verse = number(&caps, 3).ok_or_else(invalid)?;
        let end_verse = match caps.get(4) {
            Some(_) => number(&caps, 4).ok_or_else(invalid)?,
            None => start_verse,
        };
        let end_chapter = match caps.get(5) {
            Some(_) => Some(number(&caps, 5).ok_or_else(invalid)?),
            None => None,
        };
        return Ok(VerseReference::Specific {
            book: number(&caps, 1).ok_or_else(invalid)?,
            chapter: number(&caps, 2).ok_or_else(invalid)?,
            start_verse,
            end_verse,
            end_chapter,
        });
    }

    if let Some(caps) = CHAPTER_RANGE.captures(segment) {
        return Ok(VerseReference::ChapterRange {
            book: number(&caps, 1).ok_or_else(invalid)?,
            start_chapter: number(&caps, 2).ok_or_else(invalid)?,
            end_chapter: number(&caps, 3).ok_or_else(invalid)?,
        });
    }

    Err(invalid())
}

/// Numeric capture group; `None` when absent or out of range
fn number<T: std::str::FromStr>(caps: &Captures<'_>, group: usize) -> Option<T> {
    caps.get(group)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_range() {
        assert_eq!(
            parse_verse("01-05").unwrap(),
            VerseReference::BookRange {
                start_book: 1,
                end_book: 5
            }
        );
    }

    #[test]
    fn test_single_book() {
        assert_eq!(parse_verse("41").unwrap(), VerseReference::Book { book: 41 });
    }

    #[test]
    fn test_whole_chapter_shorthand() {
        let r = parse_verse("40:28").unwrap();
        assert_eq!(
            r,
            VerseReference::Specific {
                book: 40,
                chapter: 28,
                start_verse: 1,
                end_verse: 999,
                end_chapter: None
            }
        );
        assert!(r.is_whole_chapter());
    }

    #[test]
    fn test_verse_span() {
        assert_eq!(
            parse_verse("19:119:1-5").unwrap(),
            VerseReference::Specific {
                book: 19,
                chapter: 119,
                start_verse: 1,
                end_verse: 5,
                end_chapter: None
            }
        );
    }

    #[test]
    fn test_single_verse_defaults_end_to_start() {
        assert_eq!(
            parse_verse("43:3:16").unwrap(),
            VerseReference::Specific {
                book: 43,
                chapter: 3,
                start_verse: 16,
                end_verse: 16,
                end_chapter: None
            }
        );
        // Dangling dash keeps the start verse as the end
        assert_eq!(
            parse_verse("43:3:16-").unwrap(),
            parse_verse("43:3:16").unwrap()
        );
    }

    #[test]
    fn test_span_into_later_chapter() {
        assert_eq!(
            parse_verse("01:1:1-5:2").unwrap(),
            VerseReference::Specific {
                book: 1,
                chapter: 1,
                start_verse: 1,
                end_verse: 5,
                end_chapter: Some(2)
            }
        );
    }

    #[test]
    fn test_chapter_range_not_captured_by_verse_span() {
        // One colon only, so the verse span rule cannot match
        assert_eq!(
            parse_verse("41:1-16").unwrap(),
            VerseReference::ChapterRange {
                book: 41,
                start_chapter: 1,
                end_chapter: 16
            }
        );
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(parse_verse("  41 ").unwrap(), VerseReference::Book { book: 41 });
    }

    #[test]
    fn test_invalid_segments() {
        for bad in ["", "1", "001", "1:2", "Gen 1:1", "01:a", "01-05-07", "٠١"] {
            assert_eq!(
                parse_verse(bad),
                Err(ParseError::VerseFormat(bad.trim().to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_overflowing_number_is_rejected() {
        assert!(matches!(
            parse_verse("01:99999999999:1"),
            Err(ParseError::VerseFormat(_))
        ));
    }

    #[test]
    fn test_display_uses_input_notation() {
        for text in ["01-05", "41", "40:28", "19:119:1-5", "43:3:16", "01:1:1-5:2", "41:1-16"] {
            assert_eq!(parse_verse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_value(parse_verse("41:1-16").unwrap()).unwrap();
        assert_eq!(json["type"], "chapterRange");
        assert_eq!(json["startChapter"], 1);
        assert_eq!(json["endChapter"], 16);
    }
}
