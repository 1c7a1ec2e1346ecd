//! Spinners for operations that wait on the network.
//!
//! Spinners are drawn on stdout, next to the result they precede, and hidden
//! when `HOWTO_NO_PROGRESS` is set. indicatif also hides them when stdout is
//! not a terminal, so piped output only ever carries the result.

use crate::constants::NO_PROGRESS_ENV;
use indicatif::{
    ProgressBar as IndicatifBar, ProgressDrawTarget, ProgressStyle as IndicatifStyle,
};
use std::time::Duration;

fn is_progress_disabled() -> bool {
    std::env::var_os(NO_PROGRESS_ENV).is_some()
}

fn draw_target(disabled: bool) -> ProgressDrawTarget {
    if disabled {
        ProgressDrawTarget::hidden()
    } else {
        ProgressDrawTarget::stdout()
    }
}

/// A spinner with consistent styling.
pub struct Spinner {
    inner: IndicatifBar,
}

impl Spinner {
    /// Start a spinner showing `message`.
    pub fn start(message: impl Into<String>) -> Self {
        let disabled = is_progress_disabled();
        let bar = IndicatifBar::with_draw_target(None, draw_target(disabled));
        if !disabled {
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
        }
        bar.set_message(message.into());
        Self {
            inner: bar,
        }
    }

    /// Remove the spinner from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.inner.is_finished() {
            self.inner.finish_and_clear();
        }
    }
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}
