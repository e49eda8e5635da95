//! Verse index construction.
//!
//! Given a parsed reference range and a [`VerseSource`], produce the ordered
//! `(key, text)` sequence spanning the range in canonical scripture order.
//! The index is built once per alignment run and read-only afterwards.

use serde::Serialize;

use crate::books;
use crate::error::{Error, Result};
use crate::reference::RefRange;
use crate::source::{self, VerseSource};

/// One verse of the index: a canonical key plus its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseEntry {
    /// Canonical key, e.g. `"GEN_1:1"` (sub-range keys like `"GEN_1:3-4"`
    /// appear when the source groups verses).
    pub key: String,
    /// Verse content.
    pub text: String,
}

/// Build the ordered verse sequence spanning `range`.
///
/// Books are iterated from the start book's ordinal to the end book's
/// ordinal; chapters run from the range's start chapter (first book only) to
/// the range's end chapter (last book only), with middle books enumerated to
/// source exhaustion. Verses are trimmed to the range's start/end verse only
/// in the first/last chapter respectively.
///
/// Errors:
/// - [`Error::RangeNotFound`] when the computed start or end key is absent
///   from the source
/// - [`Error::EmptyRange`] when the range resolves to zero verses
pub fn build_index(range: &RefRange, source: &dyn VerseSource) -> Result<Vec<VerseEntry>> {
    let start_key = range.start.key();
    let end_key = range.end.key();
    if source.text_for(&start_key).is_none() {
        return Err(Error::RangeNotFound(start_key));
    }
    if source.text_for(&end_key).is_none() {
        return Err(Error::RangeNotFound(end_key));
    }

    // Book codes come from the parser, so they are always registry members.
    let start_number = books::book_number(range.start.book)
        .ok_or_else(|| Error::msg(format!("book code '{}' not in registry", range.start.book)))?;
    let end_number = books::book_number(range.end.book)
        .ok_or_else(|| Error::msg(format!("book code '{}' not in registry", range.end.book)))?;

    let mut entries = Vec::new();
    for number in start_number..=end_number {
        let book = books::by_number(number)
            .ok_or_else(|| Error::msg(format!("no book with ordinal {number}")))?;
        let first_book = number == start_number;
        let last_book = number == end_number;

        let first_chapter = if first_book { range.start.chapter } else { 1 };
        let last_chapter = if last_book { range.end.chapter } else { u32::MAX };

        for key in source.list_references(book.code, first_chapter..=last_chapter) {
            let (_, chapter, verse) = source::split_key(&key)?;
            if first_book && chapter == range.start.chapter && verse < range.start.verse {
                continue;
            }
            if last_book && chapter == range.end.chapter && verse > range.end.verse {
                continue;
            }

            let text = source
                .text_for(&key)
                .ok_or_else(|| Error::msg(format!("verse '{key}' listed without text")))?
                .to_string();
            entries.push(VerseEntry { key, text });
        }
    }

    if entries.is_empty() {
        return Err(Error::EmptyRange);
    }
    Ok(entries)
}
