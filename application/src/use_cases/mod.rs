//! Use cases for the capture-and-answer flow

pub mod answer_question;
pub mod extract_question;
pub mod gather_answers;
