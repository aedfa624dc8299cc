use eclipse_core::pipeline::{ProgressReporter, ScanStage};
use indicatif::{ProgressBar, ProgressStyle};

/// Drives an indicatif bar from scan progress.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new() -> anyhow::Result<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg:22} [{bar:40}] {pos}/{len} ({eta})")?
                .progress_chars("=> "),
        );
        Ok(Self { bar })
    }

    pub fn finish(&self, message: &'static str) {
        self.bar.finish_with_message(message);
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: ScanStage, total_items: Option<usize>) {
        self.bar.set_message(stage.to_string());
        self.bar.set_length(total_items.unwrap_or(0) as u64);
        self.bar.set_position(0);
    }

    fn advance(&self, items_done: usize) {
        self.bar.set_position(items_done as u64);
    }
}
