//! Progress reporting for paginated fetches

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Status line text for the current fetch counters
pub fn progress_message(fetched: u64, total: Option<u64>) -> String {
    match total {
        Some(total) => format!("fetched {} / {} records", fetched, total),
        None => format!("fetched {} records", fetched),
    }
}

/// Single-line progress indicator redrawn in place on stderr
pub struct FetchProgress {
    bar: ProgressBar,
    fetched: u64,
    total: Option<u64>,
}

impl FetchProgress {
    /// Progress drawn to stderr when it is a terminal
    pub fn stderr() -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self::with_bar(bar)
    }

    /// Progress that tracks counters without drawing anything
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            fetched: 0,
            total: None,
        }
    }

    /// Record a forwarded page and the total known so far
    pub fn advance(&mut self, records: u64, total: Option<u64>) {
        self.fetched += records;
        self.total = total;
        self.bar.set_message(progress_message(self.fetched, self.total));
        self.bar.tick();
    }

    pub fn fetched(&self) -> u64 {
        self.fetched
    }

    /// Leave the final status line on screen
    pub fn finish(&self) {
        self.bar
            .finish_with_message(progress_message(self.fetched, self.total));
    }

    /// Remove the status line, used when the run aborts
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
