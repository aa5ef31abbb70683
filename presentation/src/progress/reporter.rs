//! Progress reporting for the answer fan-out

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use snapquiz_application::BatchObserver;
use snapquiz_domain::{AnswerStatus, ResultBatch};
use std::sync::Mutex;

/// Reports fan-out progress with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn slot_message(batch: &ResultBatch, index: usize) -> String {
        let result = &batch.slots()[index];
        match &result.status {
            AnswerStatus::Answered { .. } => format!("{} {}", "v".green(), result.model),
            AnswerStatus::Error { .. } => format!("{} {}", "x".red(), result.model),
            AnswerStatus::Processing => format!(". {}", result.model),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchObserver for ProgressReporter {
    fn on_batch_start(&self, batch: &ResultBatch) {
        let pb = ProgressBar::new(batch.len() as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Answering");
        pb.set_message("Dispatching...");

        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_slot_update(&self, batch: &ResultBatch, index: usize) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            pb.set_message(Self::slot_message(batch, index));
            pb.inc(1);
        }
    }

    fn on_batch_complete(&self, _batch: &ResultBatch) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{}", "done".green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl BatchObserver for SimpleProgress {
    fn on_batch_start(&self, batch: &ResultBatch) {
        println!(
            "{} Asking {} model(s)...",
            "->".cyan(),
            batch.len()
        );
    }

    fn on_slot_update(&self, batch: &ResultBatch, index: usize) {
        let result = &batch.slots()[index];
        match &result.status {
            AnswerStatus::Answered { text, elapsed_secs } => {
                println!(
                    "  {} {} {} {}",
                    "v".green(),
                    result.model,
                    text,
                    format!("({elapsed_secs:.2}s)").dimmed()
                );
            }
            AnswerStatus::Error { message, .. } => {
                println!("  {} {} ({})", "x".red(), result.model, message);
            }
            AnswerStatus::Processing => {}
        }
    }

    fn on_batch_complete(&self, _batch: &ResultBatch) {
        println!();
    }
}
