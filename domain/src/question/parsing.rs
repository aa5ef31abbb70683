//! Transcript parsing for captured questions.
//!
//! The vision model is instructed to emit a `Question:`/`Options:` formatted
//! transcript, but real output drifts: options appear before the marker,
//! wrapped option text loses its letter prefix, or the options end up inline
//! on the question line. These functions recover an [`ExtractedQuestion`]
//! from that drift. They are pure domain logic: no I/O, just line scanning.

use super::entities::ExtractedQuestion;

const QUESTION_MARKER: &str = "Question:";
const OPTIONS_MARKER: &str = "Options:";

/// Parse a vision-model transcript into a structured question.
///
/// The first line starting with `Question:` provides the question text.
/// Option lines are collected independently from the whole transcript:
/// an `Options:` line opens the options section (and may carry the first
/// option inline), any line shaped like `A.` / `B)` / `C ...` counts as an
/// option wherever it appears, and once the section is open every non-empty
/// line is kept so wrapped option text is not lost.
///
/// A transcript without a question line (or with an empty one) yields the
/// [`NO_QUESTION_DETECTED`](super::entities::NO_QUESTION_DETECTED) sentinel
/// with an empty options block.
pub fn parse_transcript(transcript: &str) -> ExtractedQuestion {
    let lines: Vec<&str> = transcript.lines().collect();

    let mut question = String::new();
    for line in &lines {
        if let Some(rest) = line.strip_prefix(QUESTION_MARKER) {
            question = rest.trim().to_string();
            break;
        }
    }

    let mut option_lines: Vec<String> = Vec::new();

    // Options crammed onto the question line itself ("...? A) Paris B) London")
    // are split off at the earliest option marker and folded into the options.
    if let Some(split) = find_inline_option_split(&question) {
        if split > 0 {
            let inline = question[split..].trim().to_string();
            question = question[..split].trim().to_string();
            option_lines.push(inline);
        }
    }

    let mut in_options_section = false;
    for line in &lines {
        let line = line.trim();

        if line.starts_with(QUESTION_MARKER) {
            continue;
        }

        if let Some(rest) = line.strip_prefix(OPTIONS_MARKER) {
            in_options_section = true;
            let rest = rest.trim();
            if is_option_line(rest) {
                option_lines.push(rest.to_string());
            }
            continue;
        }

        if is_option_line(line) || (in_options_section && !line.is_empty()) {
            option_lines.push(line.to_string());
        }
    }

    if question.is_empty() {
        return ExtractedQuestion::no_question();
    }

    ExtractedQuestion::new(question, option_lines.join("\n"))
}

/// Whether a line looks like a choice: a letter A-D followed by `.`, `)`,
/// or whitespace.
fn is_option_line(line: &str) -> bool {
    let mut chars = line.chars();
    let Some(letter) = chars.next() else {
        return false;
    };
    if !('A'..='D').contains(&letter) {
        return false;
    }
    match chars.next() {
        Some('.') | Some(')') => true,
        Some(c) => c.is_whitespace(),
        None => false,
    }
}

/// Find the earliest inline option marker in a question line.
///
/// The first choice is always `A`, so the marker variants are `A)`, `A.`,
/// and `A ` followed by a non-letter. The marker must sit at a word boundary
/// to keep words containing an `A` (or a trailing "USA.") from splitting the
/// question mid-sentence.
fn find_inline_option_split(text: &str) -> Option<usize> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    for (i, &(pos, ch)) in chars.iter().enumerate() {
        if ch != 'A' {
            continue;
        }
        if i > 0 && !chars[i - 1].1.is_whitespace() {
            continue;
        }
        match chars.get(i + 1).map(|&(_, c)| c) {
            Some('.') | Some(')') => return Some(pos),
            Some(c) if c.is_whitespace() => {
                if let Some(&(_, next)) = chars.get(i + 2) {
                    if !next.is_alphabetic() {
                        return Some(pos);
                    }
                }
            }
            _ => {}
        }
    }
    None
}
