//! Console output formatter for answer batches

use colored::Colorize;
use snapquiz_domain::{AnswerStatus, ExtractedQuestion, ModelResult, ResultBatch};

/// Formats capture results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the question and the complete batch
    pub fn format(question: &ExtractedQuestion, batch: &ResultBatch) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("snapquiz results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            question.question()
        ));
        if question.is_multiple_choice() {
            output.push_str(&format!("{}\n", question.options()));
        }
        output.push('\n');

        output.push_str(&Self::section_header("Answers"));
        for result in batch.slots() {
            output.push('\n');
            output.push_str(&Self::format_slot(result));
            output.push('\n');
        }

        output.push_str(&Self::footer());
        output
    }

    /// One answer line per model, no decoration
    pub fn format_answers_only(batch: &ResultBatch) -> String {
        batch
            .slots()
            .iter()
            .map(|result| match &result.status {
                AnswerStatus::Answered { text, .. } => format!("{}: {}", result.model, text),
                AnswerStatus::Error { message, .. } => format!("{}: {}", result.model, message),
                AnswerStatus::Processing => format!("{}: ...", result.model),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format as JSON
    pub fn format_json(question: &ExtractedQuestion, batch: &ResultBatch) -> String {
        let value = serde_json::json!({
            "question": question,
            "results": batch,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_slot(result: &ModelResult) -> String {
        match &result.status {
            AnswerStatus::Answered { text, elapsed_secs } => format!(
                "{}\n{} {}",
                format!("── {} ──", result.model).yellow().bold(),
                text,
                format!("({elapsed_secs:.2}s)").dimmed()
            ),
            AnswerStatus::Error {
                message,
                elapsed_secs,
            } => {
                let timing = elapsed_secs
                    .map(|secs| format!(" ({secs:.2}s)"))
                    .unwrap_or_default();
                format!(
                    "{}\n{}{}",
                    format!("── {} ──", result.model).red().bold(),
                    message,
                    timing.dimmed()
                )
            }
            AnswerStatus::Processing => format!(
                "{}\nProcessing...",
                format!("── {} ──", result.model).yellow().bold()
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapquiz_domain::Model;

    fn sample_batch() -> ResultBatch {
        let models = vec![Model::new("vendor/m1"), Model::new("vendor/m2")];
        let mut batch = ResultBatch::start(1, &models);
        batch
            .complete_slot(0, AnswerStatus::answered("Paris", 1.25))
            .unwrap();
        batch
            .complete_slot(1, AnswerStatus::error("Unknown", Some(4.0)))
            .unwrap();
        batch
    }

    #[test]
    fn test_full_format_contains_question_and_answers() {
        let question = ExtractedQuestion::new("Capital of France?", "");
        let output = ConsoleFormatter::format(&question, &sample_batch());

        assert!(output.contains("Capital of France?"));
        assert!(output.contains("vendor/m1"));
        assert!(output.contains("Paris"));
        assert!(output.contains("(1.25s)"));
        assert!(output.contains("Unknown"));
    }

    #[test]
    fn test_answers_only_format() {
        let output = ConsoleFormatter::format_answers_only(&sample_batch());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Paris"));
        assert!(lines[1].contains("Unknown"));
    }

    #[test]
    fn test_json_format_is_valid_json() {
        let question = ExtractedQuestion::new("Q?", "A. x\nB. y");
        let output = ConsoleFormatter::format_json(&question, &sample_batch());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["results"]["slots"][0]["status"]["state"], "answered");
        assert_eq!(value["results"]["slots"][0]["status"]["text"], "Paris");
    }
}
