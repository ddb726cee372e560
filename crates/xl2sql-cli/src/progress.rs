//! Terminal progress bar for batch runs.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use xl2sql_core::ProgressSink;

pub struct BarSink {
    bar: ProgressBar,
}

impl BarSink {
    /// Draws on stderr; hidden when `visible` is false.
    pub fn new(visible: bool) -> Self {
        let bar = ProgressBar::with_draw_target(
            Some(100),
            if visible {
                ProgressDrawTarget::stderr()
            } else {
                ProgressDrawTarget::hidden()
            },
        );
        if let Ok(style) =
            ProgressStyle::with_template("  Generating {bar:40.cyan/blue} {pos:>3}% {msg}")
        {
            bar.set_style(style.progress_chars("##-"));
        }
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for BarSink {
    fn progress(&mut self, percent: u8) {
        self.bar.set_position(u64::from(percent));
    }

    fn status(&mut self, message: &str) {
        self.bar.set_message(message.to_string());
    }
}
