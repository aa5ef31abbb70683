//! Canonical formatting of accepted answers.

use super::validation::{CHOICE_LETTERS, clean_choice};
use crate::question::entities::AnswerKind;

/// Canonicalize an answer for display.
///
/// Multiple choice: reduce to the bare uppercase letter; if cleaning does not
/// produce a valid letter the raw text is returned unchanged (validation has
/// already rejected such answers, so this only matters for accepted ones).
///
/// Free form: trim, uppercase a lowercase leading letter, and close with a
/// period unless the answer already ends in sentence punctuation, is a
/// single token, or is purely numeric. "4" stays "4", never "4.".
///
/// Both rules are idempotent: formatting an already-formatted answer is a
/// no-op.
pub fn format_answer(answer: &str, kind: AnswerKind) -> String {
    match kind {
        AnswerKind::MultipleChoice => {
            let cleaned = clean_choice(answer);
            if cleaned.len() == 1 && CHOICE_LETTERS.contains(&cleaned) {
                cleaned
            } else {
                answer.to_string()
            }
        }
        AnswerKind::FreeForm => {
            let trimmed = answer.trim();

            let mut formatted = String::with_capacity(trimmed.len() + 1);
            let mut chars = trimmed.chars();
            match chars.next() {
                Some(first) if first.is_ascii_lowercase() => {
                    formatted.push(first.to_ascii_uppercase());
                    formatted.push_str(chars.as_str());
                }
                _ => formatted.push_str(trimmed),
            }

            let ends_punctuated = formatted.ends_with(['.', '!', '?']);
            let purely_numeric =
                !formatted.is_empty() && formatted.chars().all(|c| c.is_ascii_digit());
            let single_token = formatted.split_whitespace().count() <= 1;

            if !(ends_punctuated || purely_numeric || single_token) {
                formatted.push('.');
            }

            formatted
        }
    }
}
