//! Scripture reference parsing.
//!
//! Turns a human-typed reference string ("Gen 1:1", "1 Cor 16:1-17:1") into
//! canonical coordinates. Parsing is pure: the only dependency is the static
//! book registry, and no external data is ever read.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::books;
use crate::error::{Error, Result};

/// A fully-resolved scripture coordinate.
///
/// Always complete: a bare "John" parses as John 1:1, a bare "John 3" as
/// John 3:1. Partially-populated coordinates never escape the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coordinate {
    /// Canonical three-letter book code from the static registry.
    pub book: &'static str,
    pub chapter: u32,
    pub verse: u32,
}

impl Coordinate {
    /// The canonical key for this coordinate, e.g. `"GEN_1:1"`.
    pub fn key(&self) -> String {
        format!("{}_{}:{}", self.book, self.chapter, self.verse)
    }
}

/// An inclusive range of scripture coordinates.
///
/// When both ends share a book, the caller must supply them in (chapter,
/// verse) order; the parser does not validate or reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefRange {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl RefRange {
    /// Combine two reference strings into one range, taking the start of the
    /// first and the end of the second ("gen 1:1" + "gen 3:5" → GEN 1:1-3:5).
    pub fn between(start_input: &str, end_input: &str) -> Result<Self> {
        let start = parse(start_input)?;
        let end = parse(end_input)?;
        Ok(Self {
            start: start.start,
            end: end.end,
        })
    }
}

/// Reference shape: optional leading digit (book-family prefix), book name
/// letters, optional chapter, optional ":verse", optional "-" range tail with
/// optional end-chapter and ":end-verse".
static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d)?(\D+)(\d+)?(?::(\d+))?(?:-(\d+)?(?::(\d+))?)?$")
        .expect("reference pattern is valid")
});

/// Parse a free-form scripture reference into a canonical range.
///
/// All whitespace is stripped and matching is case-insensitive. A reference
/// without an explicit range tail resolves to a single-coordinate range
/// (end == start).
///
/// Errors:
/// - [`Error::MalformedReference`] when the input does not fit the shape
/// - [`Error::UnknownBook`] when the book name matches no registry alias
pub fn parse(input: &str) -> Result<RefRange> {
    let normalized: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    let captures = REFERENCE_PATTERN
        .captures(&normalized)
        .ok_or_else(|| Error::MalformedReference(input.to_string()))?;

    let prefix = captures.get(1).map(|m| m.as_str()).unwrap_or("");
    let name = captures.get(2).map(|m| m.as_str()).unwrap_or("");
    let full_name = format!("{prefix}{name}");

    let book = books::resolve_alias(&full_name)
        .ok_or_else(|| Error::UnknownBook(input.to_string()))?;

    let start_chapter = capture_number(&captures, 3, input)?.unwrap_or(1);
    let start_verse = capture_number(&captures, 4, input)?.unwrap_or(1);
    let end_chapter = capture_number(&captures, 5, input)?.unwrap_or(start_chapter);
    let end_verse = capture_number(&captures, 6, input)?.unwrap_or(start_verse);

    Ok(RefRange {
        start: Coordinate {
            book: book.code,
            chapter: start_chapter,
            verse: start_verse,
        },
        end: Coordinate {
            book: book.code,
            chapter: end_chapter,
            verse: end_verse,
        },
    })
}

fn capture_number(captures: &regex::Captures, index: usize, input: &str) -> Result<Option<u32>> {
    match captures.get(index) {
        None => Ok(None),
        Some(m) => m
            .as_str()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| Error::MalformedReference(input.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_reference() {
        let range = parse("Gen 1:1").unwrap();
        assert_eq!(range.start.book, "GEN");
        assert_eq!(range.start.chapter, 1);
        assert_eq!(range.start.verse, 1);
        assert_eq!(range.end, range.start);
    }

    #[test]
    fn chapter_and_verse_default_to_one() {
        let range = parse("John").unwrap();
        assert_eq!(range.start, Coordinate { book: "JHN", chapter: 1, verse: 1 });

        // A bare "John 3" resolves to exactly John 3:1.
        let range = parse("John 3").unwrap();
        assert_eq!(range.start, Coordinate { book: "JHN", chapter: 3, verse: 1 });
        assert_eq!(range.end, range.start);
    }

    #[test]
    fn parses_cross_chapter_range() {
        let range = parse("1 Cor 16:1-17:1").unwrap();
        assert_eq!(range.start, Coordinate { book: "1CO", chapter: 16, verse: 1 });
        assert_eq!(range.end, Coordinate { book: "1CO", chapter: 17, verse: 1 });
    }

    #[test]
    fn parses_same_chapter_range() {
        let range = parse("Lev 5:20-5:26").unwrap();
        assert_eq!(range.start, Coordinate { book: "LEV", chapter: 5, verse: 20 });
        assert_eq!(range.end, Coordinate { book: "LEV", chapter: 5, verse: 26 });
    }

    #[test]
    fn range_end_defaults_mirror_start() {
        // Missing end-chapter inherits the start chapter.
        let range = parse("mal 1:1-4").unwrap();
        assert_eq!(range.end, Coordinate { book: "MAL", chapter: 4, verse: 1 });
    }

    #[test]
    fn whitespace_and_case_are_ignored() {
        let range = parse("  lEv   5 : 20 ").unwrap();
        assert_eq!(range.start, Coordinate { book: "LEV", chapter: 5, verse: 20 });
    }

    #[test]
    fn every_registry_alias_parses_to_its_book() {
        for book in &crate::books::BOOKS {
            for alias in book.aliases {
                let input = format!("{alias} 1:1");
                let range = parse(&input).unwrap_or_else(|err| {
                    panic!("'{input}' failed to parse: {err}");
                });
                assert_eq!(range.start.book, book.code, "'{input}' resolved wrong");
                assert_eq!(range.start.chapter, 1);
                assert_eq!(range.start.verse, 1);
            }
        }
    }

    #[test]
    fn unknown_book_is_rejected() {
        match parse("XXX 1:1") {
            Err(Error::UnknownBook(input)) => assert_eq!(input, "XXX 1:1"),
            other => panic!("expected UnknownBook, got {other:?}"),
        }
    }

    #[test]
    fn structurally_invalid_input_is_rejected() {
        assert!(matches!(parse(""), Err(Error::MalformedReference(_))));
        assert!(matches!(parse("123"), Err(Error::MalformedReference(_))));
    }

    #[test]
    fn between_combines_two_references() {
        let range = RefRange::between("lev 5:20", "lev 5:26").unwrap();
        assert_eq!(range.start.verse, 20);
        assert_eq!(range.end.verse, 26);
    }

    #[test]
    fn coordinate_key_format() {
        let range = parse("rev 22:21").unwrap();
        assert_eq!(range.start.key(), "REV_22:21");
    }
}
