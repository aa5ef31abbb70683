//! Answer validation for model responses.
//!
//! These predicates decide whether a raw model answer satisfies the output
//! contract of its question kind. They are pure domain logic: no I/O, just
//! text inspection. Formatting of accepted answers lives in
//! [`formatting`](super::formatting).

use crate::question::entities::AnswerKind;

/// Letters a multiple-choice answer may resolve to.
pub(crate) const CHOICE_LETTERS: &str = "ABCD";

/// Longest acceptable free-form answer, in whitespace-delimited words.
///
/// Anything longer means the model ignored the brevity instructions.
const MAX_FREE_FORM_WORDS: usize = 20;

/// Decide whether a raw model answer is acceptable for the question kind.
///
/// Multiple choice: the answer, stripped of every non-alphanumeric character
/// and uppercased, must be exactly one of `A`, `B`, `C`, `D`. Punctuation and
/// whitespace around the letter are tolerated ("(b)." is a valid `B`).
///
/// Free form: the trimmed answer must be non-empty and at most 20 words.
pub fn validate_answer(answer: &str, kind: AnswerKind) -> bool {
    match kind {
        AnswerKind::MultipleChoice => {
            let cleaned = clean_choice(answer);
            cleaned.len() == 1 && CHOICE_LETTERS.contains(&cleaned)
        }
        AnswerKind::FreeForm => {
            let trimmed = answer.trim();
            !trimmed.is_empty() && trimmed.split_whitespace().count() <= MAX_FREE_FORM_WORDS
        }
    }
}

/// Strip non-alphanumerics and uppercase, reducing a choice answer to its
/// letter (or to noise that validation rejects).
pub(crate) fn clean_choice(answer: &str) -> String {
    answer
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_uppercase()
}
