use versealign::align::{Alignment, align};
use versealign::opts::{AlignOpts, SpanOpts};
use versealign::reference::RefRange;
use versealign::segment::build_spans;
use versealign::source::VerseTable;
use versealign::verses::{VerseEntry, build_index};
use versealign::words::TimedWord;

const MS_PER_WORD: u64 = 500;

fn timed_words(tokens: &[&str]) -> Vec<TimedWord> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            TimedWord::new(*token, i as u64 * MS_PER_WORD, (i as u64 + 1) * MS_PER_WORD)
        })
        .collect()
}

/// A noise-free transcript: every verse's words in order, nothing else.
fn synthetic_transcript(verses: &[VerseEntry]) -> Vec<TimedWord> {
    let tokens: Vec<String> = verses
        .iter()
        .flat_map(|verse| {
            verse
                .text
                .split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
        })
        .collect();
    timed_words(&tokens.iter().map(String::as_str).collect::<Vec<_>>())
}

fn genesis_table() -> VerseTable {
    VerseTable::from_flat_lines(
        vec!["GEN 1:1", "GEN 1:2", "GEN 1:3", "GEN 1:4"],
        vec![
            "in the beginning god created the heavens and the earth",
            "the earth was formless and empty and darkness covered the deep",
            "god said let there be light and there was light",
            "god saw that the light was good and separated light from darkness",
        ],
    )
    .unwrap()
}

#[test]
fn end_to_end_two_verse_scenario() -> anyhow::Result<()> {
    let table = VerseTable::from_flat_lines(
        vec!["GEN 1:1", "GEN 1:2"],
        vec!["in the beginning", "the earth was formless"],
    )?;
    let range = RefRange::between("gen 1:1", "gen 1:2")?;
    let verses = build_index(&range, &table)?;

    let words = timed_words(&["in", "the", "beginning", "the", "earth", "was", "formless"]);
    let alignments = align(&verses, &words, &AlignOpts::default());

    assert_eq!(alignments.len(), 2);
    assert_eq!(
        (alignments[0].start_word, alignments[0].end_word, alignments[0].score),
        (0, 3, 100)
    );
    assert_eq!(
        (alignments[1].start_word, alignments[1].end_word, alignments[1].score),
        (3, 7, 100)
    );

    let spans = build_spans(&alignments, &words, 7 * MS_PER_WORD, &SpanOpts::default());
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].start_ms, 0);
    assert_eq!(spans[0].end_ms, 2000); // end of "beginning" + 500ms buffer
    assert_eq!(spans[1].start_ms, 1500);
    assert_eq!(spans[1].end_ms, 3500); // clamped to total duration
    Ok(())
}

#[test]
fn noise_free_transcript_aligns_every_verse_perfectly() -> anyhow::Result<()> {
    let range = RefRange::between("gen 1:1", "gen 1:4")?;
    let verses = build_index(&range, &genesis_table())?;
    let words = synthetic_transcript(&verses);

    let alignments = align(&verses, &words, &AlignOpts::default());

    for alignment in &alignments {
        assert_eq!(alignment.score, 100, "verse {} did not match", alignment.verse_key);
        assert!(!alignment.estimated);
    }

    // Boundaries march strictly forward on the happy path.
    for pair in alignments.windows(2) {
        assert!(pair[0].start_word < pair[1].start_word);
        assert!(pair[0].end_word < pair[1].end_word);
        assert_eq!(pair[0].end_word, pair[1].start_word);
    }
    Ok(())
}

#[test]
fn alignment_is_deterministic() -> anyhow::Result<()> {
    let range = RefRange::between("gen 1:1", "gen 1:4")?;
    let verses = build_index(&range, &genesis_table())?;
    // A mangled transcript: dropped and misrecognized words.
    let words = timed_words(&[
        "beginning", "god", "created", "heavens", "earth", "formless", "empty", "darkness",
        "covered", "deep", "god", "said", "light", "there", "light", "god", "saw", "light",
        "good", "separated",
    ]);

    let opts = AlignOpts {
        extension_percent: 300,
    };
    let first: Vec<Alignment> = align(&verses, &words, &opts);
    for _ in 0..3 {
        assert_eq!(align(&verses, &words, &opts), first);
    }
    Ok(())
}

#[test]
fn drifting_narration_is_recovered_by_the_window() -> anyhow::Result<()> {
    let range = RefRange::between("gen 1:1", "gen 1:2")?;
    let verses = build_index(&range, &genesis_table())?;

    // Lead-in chatter pushes every verse later than its proportional
    // estimate; the first-verse window boost has to absorb it.
    let words = timed_words(&[
        "recording", "one", "chapter", "one", "in", "the", "beginning", "god", "created", "the",
        "heavens", "and", "the", "earth", "the", "earth", "was", "formless", "and", "empty",
        "and", "darkness", "covered", "the", "deep",
    ]);

    let alignments = align(&verses, &words, &AlignOpts { extension_percent: 300 });

    assert_eq!(alignments[0].start_word, 4);
    assert_eq!(alignments[0].end_word, 14);
    assert_eq!(alignments[0].score, 100);
    assert_eq!(alignments[1].start_word, 14);
    assert_eq!(alignments[1].end_word, 25);
    assert_eq!(alignments[1].score, 100);
    Ok(())
}

#[test]
fn usfm_directory_feeds_the_full_pipeline() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join("41MAT.SFM"),
        "\\id MAT Matthew\n\\c 1\n\\v 1 the book of the genealogy\n\\v 2 abraham was the father\n",
    )?;

    let table = VerseTable::from_usfm_dir(dir.path())?;
    let range = RefRange::between("mat 1:1", "mat 1:2")?;
    let verses = build_index(&range, &table)?;
    assert_eq!(verses.len(), 2);
    assert_eq!(verses[0].key, "MAT_1:1");

    let words = synthetic_transcript(&verses);
    let alignments = align(&verses, &words, &AlignOpts::default());
    assert_eq!(alignments[0].score, 100);
    assert_eq!(alignments[1].score, 100);
    Ok(())
}

#[test]
fn fallback_is_flagged_not_fatal() -> anyhow::Result<()> {
    let range = RefRange::between("gen 1:1", "gen 1:2")?;
    let verses = build_index(&range, &genesis_table())?;

    // Single-character transcript sharing nothing with either verse: every
    // candidate scores zero, so both verses fall back to their estimates.
    let words = timed_words(&["zzz"]);
    let alignments = align(&verses, &words, &AlignOpts::default());

    assert_eq!(alignments.len(), 2);
    for alignment in &alignments {
        assert_eq!(alignment.score, 0);
        assert!(alignment.estimated);
        assert!(alignment.end_word <= words.len());
    }
    Ok(())
}
