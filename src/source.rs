//! Verse-text sources.
//!
//! The verse index is polymorphic over where verse text comes from: a flat
//! parallel corpus (one reference list file plus one text file, one verse per
//! line) or a directory of USFM chapter documents. Both load into the same
//! in-memory [`VerseTable`]; the index only depends on the [`VerseSource`]
//! capability, so other backings can be supplied by callers.
//!
//! Loading happens once per run, up front. There is no lazy I/O and no cache
//! with an ambiguous lifetime: a `VerseTable` is immutable after construction.

use std::collections::HashMap;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::books;
use crate::error::{Error, Result};

/// The capability the verse index builds against.
pub trait VerseSource {
    /// Ordered canonical keys (`"GEN_1:1"`) for the verses of `book` whose
    /// chapter falls within `chapters`, in scripture order. Chapters absent
    /// from the store are simply not represented in the result.
    fn list_references(&self, book: &str, chapters: RangeInclusive<u32>) -> Vec<String>;

    /// The text for one canonical key, if the store has it.
    fn text_for(&self, key: &str) -> Option<&str>;
}

#[derive(Debug, Clone)]
struct VerseRecord {
    key: String,
    book: String,
    chapter: u32,
    /// Leading verse number of the key (sub-range keys like `"3-4"` order by
    /// their first verse).
    verse: u32,
}

/// An immutable in-memory verse store.
///
/// Records are kept in canonical scripture order; texts are looked up by key.
pub struct VerseTable {
    records: Vec<VerseRecord>,
    texts: HashMap<String, String>,
}

impl VerseTable {
    /// Build a table from parallel reference and text line sequences.
    ///
    /// `refs` lines follow the eBible corpus layout (`"GEN 1:1"`); `texts`
    /// holds the verse content at the same line positions.
    pub fn from_flat_lines<R, T>(refs: R, texts: T) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let mut records = Vec::new();
        let mut text_map = HashMap::new();

        let mut refs = refs.into_iter();
        let mut texts = texts.into_iter();
        loop {
            match (refs.next(), texts.next()) {
                (Some(reference), Some(text)) => {
                    let key = reference.as_ref().trim().replace(' ', "_");
                    if key.is_empty() {
                        continue;
                    }
                    let (book, chapter, verse) = split_key(&key)?;
                    records.push(VerseRecord {
                        key: key.clone(),
                        book,
                        chapter,
                        verse,
                    });
                    text_map.insert(key, text.as_ref().trim().to_string());
                }
                (None, None) => break,
                _ => {
                    return Err(Error::msg(
                        "reference list and text list have different lengths",
                    ));
                }
            }
        }

        Ok(Self {
            records,
            texts: text_map,
        })
    }

    /// Build a table from a reference list file and a parallel text file.
    pub fn from_flat_files(vref_path: &Path, text_path: &Path) -> Result<Self> {
        let refs = fs::read_to_string(vref_path)
            .with_context(|| format!("failed to read reference list '{}'", vref_path.display()))?;
        let texts = fs::read_to_string(text_path)
            .with_context(|| format!("failed to read verse text '{}'", text_path.display()))?;
        Self::from_flat_lines(refs.lines(), texts.lines())
    }

    /// Build a table from a directory of USFM documents.
    ///
    /// Files with an `.SFM`/`.sfm`/`.usfm` extension are scanned for `\id`,
    /// `\c` and `\v` markers; inline formatting spans are stripped from verse
    /// text. Records are sorted into canonical scripture order afterwards, so
    /// directory listing order does not matter.
    pub fn from_usfm_dir(dir: &Path) -> Result<Self> {
        let mut paths = Vec::new();
        let entries = fs::read_dir(dir)
            .with_context(|| format!("failed to read USFM directory '{}'", dir.display()))?;
        for entry in entries {
            let path = entry
                .with_context(|| format!("failed to list USFM directory '{}'", dir.display()))?
                .path();
            let is_usfm = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("sfm") || ext.eq_ignore_ascii_case("usfm"))
                .unwrap_or(false);
            if is_usfm {
                paths.push(path);
            }
        }
        paths.sort();

        let mut records = Vec::new();
        let mut texts = HashMap::new();
        for path in &paths {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read USFM file '{}'", path.display()))?;
            parse_usfm(&content, &mut records, &mut texts)?;
        }

        // Files can arrive in arbitrary name order; canonical order is what
        // the index iterates in.
        records.sort_by_key(|record| {
            (
                books::book_number(&record.book).unwrap_or(usize::MAX),
                record.chapter,
                record.verse,
            )
        });

        Ok(Self { records, texts })
    }
}

impl VerseSource for VerseTable {
    fn list_references(&self, book: &str, chapters: RangeInclusive<u32>) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| record.book == book && chapters.contains(&record.chapter))
            .map(|record| record.key.clone())
            .collect()
    }

    fn text_for(&self, key: &str) -> Option<&str> {
        self.texts.get(key).map(String::as_str)
    }
}

/// Split a canonical key (`"GEN_1:1"` or `"GEN_1:3-4"`) into book, chapter,
/// and leading verse number.
pub(crate) fn split_key(key: &str) -> Result<(String, u32, u32)> {
    let malformed = || Error::msg(format!("malformed verse key: '{key}'"));

    let (book, position) = key.split_once('_').ok_or_else(malformed)?;
    let (chapter, verse) = position.split_once(':').ok_or_else(malformed)?;
    let chapter: u32 = chapter.parse().map_err(|_| malformed())?;
    let leading_verse = verse.split('-').next().unwrap_or(verse);
    let verse: u32 = leading_verse.parse().map_err(|_| malformed())?;
    Ok((book.to_string(), chapter, verse))
}

/// Inline USFM spans (`\add ...\add*`, footnotes, cross references).
static USFM_INLINE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\+?\w+\s[^\\]*\\\+?\w+\*").expect("USFM span pattern is valid"));

/// Leftover USFM markers after span removal.
static USFM_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\+?\w+\*?").expect("USFM marker pattern is valid"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

fn strip_usfm_markup(text: &str) -> String {
    let text = USFM_INLINE_SPAN.replace_all(text, " ");
    let text = USFM_MARKER.replace_all(&text, " ");
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

fn parse_usfm(
    content: &str,
    records: &mut Vec<VerseRecord>,
    texts: &mut HashMap<String, String>,
) -> Result<()> {
    let mut book: Option<String> = None;
    let mut chapter: Option<u32> = None;

    for line in content.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix(r"\id ") {
            book = rest.split_whitespace().next().map(str::to_string);
        } else if let Some(rest) = line.strip_prefix(r"\c ") {
            chapter = rest.split_whitespace().next().and_then(|c| c.parse().ok());
        } else if let Some(rest) = line.strip_prefix(r"\v ") {
            let mut parts = rest.splitn(2, ' ');
            let verse_field = match parts.next() {
                Some(field) if !field.is_empty() => field,
                _ => continue,
            };
            let body = parts.next().unwrap_or("");

            let (book, chapter) = match (&book, chapter) {
                (Some(book), Some(chapter)) => (book.clone(), chapter),
                // A \v before \id or \c is not attributable to a verse.
                _ => continue,
            };
            let leading_verse: u32 = match verse_field.split('-').next().unwrap_or("").parse() {
                Ok(verse) => verse,
                Err(_) => continue,
            };

            let key = format!("{book}_{chapter}:{verse_field}");
            records.push(VerseRecord {
                key: key.clone(),
                book,
                chapter,
                verse: leading_verse,
            });
            texts.insert(key, strip_usfm_markup(body));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_table() -> VerseTable {
        VerseTable::from_flat_lines(
            vec!["GEN 1:1", "GEN 1:2", "GEN 1:3", "GEN 2:1", "EXO 1:1"],
            vec!["first", "second", "third", "fourth", "fifth"],
        )
        .unwrap()
    }

    #[test]
    fn flat_lines_become_keyed_records() {
        let table = flat_table();
        assert_eq!(table.text_for("GEN_1:1"), Some("first"));
        assert_eq!(table.text_for("EXO_1:1"), Some("fifth"));
        assert_eq!(table.text_for("GEN_9:9"), None);
    }

    #[test]
    fn list_references_filters_by_book_and_chapter() {
        let table = flat_table();
        assert_eq!(
            table.list_references("GEN", 1..=1),
            vec!["GEN_1:1", "GEN_1:2", "GEN_1:3"]
        );
        assert_eq!(table.list_references("GEN", 1..=u32::MAX).len(), 4);
        assert_eq!(table.list_references("EXO", 1..=u32::MAX), vec!["EXO_1:1"]);
        assert!(table.list_references("LEV", 1..=u32::MAX).is_empty());
    }

    #[test]
    fn mismatched_flat_lengths_error() {
        let result = VerseTable::from_flat_lines(vec!["GEN 1:1", "GEN 1:2"], vec!["only one"]);
        assert!(result.is_err());
    }

    #[test]
    fn split_key_handles_verse_ranges() {
        assert_eq!(split_key("GEN_1:1").unwrap(), ("GEN".to_string(), 1, 1));
        assert_eq!(split_key("PSA_119:3-4").unwrap(), ("PSA".to_string(), 119, 3));
        assert!(split_key("nonsense").is_err());
    }

    #[test]
    fn usfm_markup_is_stripped() {
        assert_eq!(
            strip_usfm_markup(r"In the beginning \add God\add* created"),
            "In the beginning created"
        );
        assert_eq!(strip_usfm_markup(r"plain text"), "plain text");
        assert_eq!(strip_usfm_markup(r"trailing \q1 marker"), "trailing marker");
    }

    #[test]
    fn usfm_content_parses_into_records() {
        let content = "\\id GEN Genesis\n\\c 1\n\\v 1 In the beginning\n\\v 2 The earth was formless\n\\c 2\n\\v 1 The heavens were finished\n";
        let mut records = Vec::new();
        let mut texts = HashMap::new();
        parse_usfm(content, &mut records, &mut texts).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].key, "GEN_1:1");
        assert_eq!(records[2].key, "GEN_2:1");
        assert_eq!(texts.get("GEN_1:2").map(String::as_str), Some("The earth was formless"));
    }

    #[test]
    fn usfm_verse_before_chapter_is_skipped() {
        let content = "\\id GEN\n\\v 1 orphaned\n\\c 1\n\\v 1 kept\n";
        let mut records = Vec::new();
        let mut texts = HashMap::new();
        parse_usfm(content, &mut records, &mut texts).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "GEN_1:1");
    }
}
