use indicatif::{ProgressBar, ProgressStyle};
use tlc_core::pipeline::ProgressReporter;

/// Drives an indicatif bar from batch progress.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new() -> anyhow::Result<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg:20} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        bar.set_message("Analyzing plates");
        Ok(Self { bar })
    }
}

impl ProgressReporter for BarReporter {
    fn begin_batch(&self, total_plates: usize) {
        self.bar.set_length(total_plates as u64);
    }

    fn advance(&self, _plates_done: usize) {
        // Plates may finish out of order when the batch runs in parallel.
        self.bar.inc(1);
    }

    fn finish_batch(&self) {
        self.bar.finish_and_clear();
    }
}
