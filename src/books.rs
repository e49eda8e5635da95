//! Static registry of the 66 canonical scripture books.
//!
//! The registry is immutable and constructed once at process start. It maps
//! each canonical three-letter code to its alias spellings and its 1-based
//! ordinal position, which establishes canonical book ordering for range
//! iteration.

use once_cell::sync::Lazy;

/// One entry in the canonical book table.
#[derive(Debug, Clone, Copy)]
pub struct Book {
    /// Canonical three-letter code, e.g. `"GEN"`.
    pub code: &'static str,
    /// Recognized alias spellings, matched as case-insensitive prefixes of
    /// the typed book name.
    pub aliases: &'static [&'static str],
}

/// The 66 canonical books in scripture order. Index + 1 is the book's ordinal.
pub const BOOKS: [Book; 66] = [
    Book { code: "GEN", aliases: &["Gen", "Gn", "1M"] },
    Book { code: "EXO", aliases: &["Ex", "2M"] },
    Book { code: "LEV", aliases: &["Lev", "Lv", "3M"] },
    Book { code: "NUM", aliases: &["Nm", "Nu", "4M"] },
    Book { code: "DEU", aliases: &["Deut", "Dt", "5M"] },
    Book { code: "JOS", aliases: &["Josh", "Jos"] },
    Book { code: "JDG", aliases: &["Jdg", "Judg"] },
    Book { code: "RUT", aliases: &["Ru", "Rth"] },
    Book { code: "1SA", aliases: &["1Sam", "1Sm"] },
    Book { code: "2SA", aliases: &["2Sam", "2Sm"] },
    Book { code: "1KI", aliases: &["1Kg", "1K"] },
    Book { code: "2KI", aliases: &["2Kg", "2K"] },
    Book { code: "1CH", aliases: &["1Ch"] },
    Book { code: "2CH", aliases: &["2Ch"] },
    Book { code: "EZR", aliases: &["Ezr"] },
    Book { code: "NEH", aliases: &["Neh"] },
    Book { code: "EST", aliases: &["Est"] },
    Book { code: "JOB", aliases: &["Jb", "Job"] },
    Book { code: "PSA", aliases: &["Ps"] },
    Book { code: "PRO", aliases: &["Pr"] },
    Book { code: "ECC", aliases: &["Ec", "Qoh"] },
    Book { code: "SNG", aliases: &["Sos", "Song"] },
    Book { code: "ISA", aliases: &["Isa"] },
    Book { code: "JER", aliases: &["Jer", "Jr"] },
    Book { code: "LAM", aliases: &["Lam", "Lm"] },
    Book { code: "EZK", aliases: &["Ezek", "Ezk"] },
    Book { code: "DAN", aliases: &["Dn", "Dan"] },
    Book { code: "HOS", aliases: &["Hos", "Hs"] },
    Book { code: "JOL", aliases: &["Joel", "Jl"] },
    Book { code: "AMO", aliases: &["Am"] },
    Book { code: "OBA", aliases: &["Ob"] },
    Book { code: "JON", aliases: &["Jon"] },
    Book { code: "MIC", aliases: &["Mi", "Mc"] },
    Book { code: "NAM", aliases: &["Na"] },
    Book { code: "HAB", aliases: &["Hab"] },
    Book { code: "ZEP", aliases: &["Zep", "Zp"] },
    Book { code: "HAG", aliases: &["Hag", "Hg"] },
    Book { code: "ZEC", aliases: &["Zc", "Zec"] },
    Book { code: "MAL", aliases: &["Mal", "Ml"] },
    Book { code: "MAT", aliases: &["Mt", "Mat"] },
    Book { code: "MRK", aliases: &["Mk", "Mar"] },
    Book { code: "LUK", aliases: &["Lk", "Lu"] },
    Book { code: "JHN", aliases: &["Jn", "Joh", "Jhn"] },
    Book { code: "ACT", aliases: &["Ac"] },
    Book { code: "ROM", aliases: &["Ro", "Rm"] },
    Book { code: "1CO", aliases: &["1Co"] },
    Book { code: "2CO", aliases: &["2Co"] },
    Book { code: "GAL", aliases: &["Gal", "Gl"] },
    Book { code: "EPH", aliases: &["Ep"] },
    Book { code: "PHP", aliases: &["Php", "Philip"] },
    Book { code: "COL", aliases: &["Col"] },
    Book { code: "1TH", aliases: &["1Th"] },
    Book { code: "2TH", aliases: &["2Th"] },
    Book { code: "1TI", aliases: &["1Ti", "1Tm"] },
    Book { code: "2TI", aliases: &["2Ti", "2Tm"] },
    Book { code: "TIT", aliases: &["Tit"] },
    Book { code: "PHM", aliases: &["Phile", "Phm"] },
    Book { code: "HEB", aliases: &["Hb", "Heb"] },
    Book { code: "JAS", aliases: &["Ja", "Jm"] },
    Book { code: "1PE", aliases: &["1Pe", "1Pt"] },
    Book { code: "2PE", aliases: &["2Pe", "2Pt"] },
    Book { code: "1JN", aliases: &["1Jn", "1Jo", "1Jh"] },
    Book { code: "2JN", aliases: &["2Jn", "2Jo", "2Jh"] },
    Book { code: "3JN", aliases: &["3Jn", "3Jo", "3Jh"] },
    Book { code: "JUD", aliases: &["Ju", "Jd"] },
    Book { code: "REV", aliases: &["Rev", "Rv"] },
];

/// Uppercased aliases paired with their book index, longest alias first.
///
/// Sorting by descending length makes prefix resolution longest-match: when
/// one alias is a strict prefix of another ("Jo" vs "Joel"), the more
/// specific spelling wins regardless of table order. The sort is stable, so
/// same-length aliases keep table order.
static ALIAS_TABLE: Lazy<Vec<(String, usize)>> = Lazy::new(|| {
    let mut table: Vec<(String, usize)> = Vec::new();
    for (index, book) in BOOKS.iter().enumerate() {
        for alias in book.aliases {
            table.push((alias.to_uppercase(), index));
        }
    }
    table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    table
});

/// Resolve a typed book name against the alias table.
///
/// Matching is "input starts with alias", case-insensitive, longest alias
/// wins. Returns `None` when no alias matches.
pub fn resolve_alias(name: &str) -> Option<&'static Book> {
    let upper = name.to_uppercase();
    ALIAS_TABLE
        .iter()
        .find(|(alias, _)| upper.starts_with(alias.as_str()))
        .map(|&(_, index)| &BOOKS[index])
}

/// Look up a book by its canonical three-letter code.
pub fn by_code(code: &str) -> Option<&'static Book> {
    BOOKS.iter().find(|book| book.code == code)
}

/// The 1-based ordinal of a book code in canonical order (GEN = 1, REV = 66).
pub fn book_number(code: &str) -> Option<usize> {
    BOOKS.iter().position(|book| book.code == code).map(|i| i + 1)
}

/// Look up a book by its 1-based ordinal.
pub fn by_number(number: usize) -> Option<&'static Book> {
    if number == 0 {
        return None;
    }
    BOOKS.get(number - 1)
}
