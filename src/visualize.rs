//! Human-readable alignment visualization.
//!
//! For each verse this writes a block showing the normalized verse text, the
//! search window projected onto the transcript (`s`/`e` rulers), the
//! transcript context itself, and the chosen span. Purely a debugging aid;
//! nothing downstream consumes it.
//!
//! Example block:
//!
//! ```text
//! v_ref: in the beginning
//! ssssssssssssssssssss
//! eeeeeeeeeeeeeeeeeeee
//! in the beginning the earth
//! s--------------e
//! ```

use std::io::Write;

use crate::align::VerseTrace;
use crate::error::Result;
use crate::words::TimedWord;

/// How many words of transcript to show on each side of the search window.
pub const DEFAULT_CONTEXT_SIZE: usize = 20;

/// Write one visualization block per trace.
pub fn write_visualization<W: Write>(
    mut w: W,
    traces: &[VerseTrace],
    words: &[TimedWord],
    context_size: usize,
) -> Result<()> {
    for trace in traces {
        let context_start = trace.window_start.saturating_sub(context_size);
        let context_end = (trace.window_end + context_size).min(words.len());
        let context_words = &words[context_start..context_end];

        // Character offset of each word boundary within the joined context,
        // one extra entry for the position past the final word.
        let mut char_positions = Vec::with_capacity(context_words.len() + 1);
        char_positions.push(0usize);
        for word in context_words {
            let last = *char_positions.last().unwrap_or(&0);
            char_positions.push(last + word.text.chars().count() + 1);
        }
        let context: String = context_words
            .iter()
            .map(|word| word.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let project = |index: usize| -> usize {
            if index < context_start {
                return 0;
            }
            match char_positions.get(index - context_start) {
                Some(&position) => position,
                None => context.chars().count(),
            }
        };

        let window_from = project(trace.window_start);
        let window_to = project(trace.window_end);
        let chosen_from = project(trace.best_start);
        let chosen_to = project(trace.best_end);

        writeln!(w, "v_ref: {}", trace.verse_text)?;
        writeln!(w, "{}", ruler(window_from, window_to, 's'))?;
        writeln!(w, "{}", ruler(window_from, window_to, 'e'))?;
        writeln!(w, "{context}")?;
        writeln!(w, "{}", span_line(chosen_from, chosen_to))?;
        writeln!(w)?;
    }

    w.flush()?;
    Ok(())
}

/// A line of `fill` characters covering `[from, to)`, offset by spaces.
fn ruler(from: usize, to: usize, fill: char) -> String {
    let width = to.saturating_sub(from);
    let mut line = " ".repeat(from);
    line.extend(std::iter::repeat(fill).take(width));
    line
}

/// The chosen-span line: `s`, a dashed body, and `e`.
fn span_line(from: usize, to: usize) -> String {
    let width = to.saturating_sub(from);
    let mut line = " ".repeat(from);
    match width {
        0 => {}
        1 => line.push('s'),
        _ => {
            line.push('s');
            line.extend(std::iter::repeat('-').take(width - 2));
            line.push('e');
        }
    }
    line
}
