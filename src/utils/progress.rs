use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str =
    "{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records ({eta})";

/// Record counter for long-running generation. A quiet reporter swallows
/// every update.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new(total_records: u64, message: &str, quiet: bool) -> Self {
        if quiet {
            return Self::quiet();
        }

        let bar = ProgressBar::new(total_records);
        if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    pub fn quiet() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.bar.is_hidden()
    }

    pub fn update(&self, records_done: u64) {
        self.bar.set_position(records_done);
    }

    pub fn finish_with_message(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish();
        }
    }
}
