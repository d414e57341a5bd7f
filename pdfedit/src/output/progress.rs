//! Per-page progress display.
//!
//! Progress is drawn on stderr so it never mixes with listing output on
//! stdout, and only when stderr is a terminal.
//!
//! # Examples
//!
//! ```
//! use pdfedit::output::progress::{ProgressBar, ProgressStyle};
//!
//! let mut progress = ProgressBar::new(12, ProgressStyle::Bar);
//! progress.set_message("Splitting");
//!
//! for page in 1..=12 {
//!     progress.update(page);
//! }
//!
//! progress.finish();
//! ```

use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

/// Style of progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStyle {
    /// `[=====>    ] 50% 6/12 0.3s`
    Bar,
    /// `6/12`
    Counter,
}

const BAR_WIDTH: usize = 30;

/// Progress indicator for operations over a known number of pages.
#[derive(Debug)]
pub struct ProgressBar {
    total: usize,
    current: usize,
    style: ProgressStyle,
    message: Option<String>,
    start_time: Instant,
    last_draw: Option<Instant>,
    /// Minimum time between redraws.
    redraw_interval: Duration,
    enabled: bool,
}

impl ProgressBar {
    /// Create a progress bar, enabled when stderr is a terminal.
    pub fn new(total: usize, style: ProgressStyle) -> Self {
        Self {
            total,
            current: 0,
            style,
            message: None,
            start_time: Instant::now(),
            last_draw: None,
            redraw_interval: Duration::from_millis(80),
            enabled: io::stderr().is_terminal(),
        }
    }

    /// Create a progress bar that never draws.
    pub fn disabled() -> Self {
        let mut bar = Self::new(0, ProgressStyle::Counter);
        bar.enabled = false;
        bar
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn position(&self) -> usize {
        self.current
    }

    /// Move to `current` items done, redrawing at most every few
    /// milliseconds. The final position is always drawn.
    pub fn update(&mut self, current: usize) {
        self.current = current.min(self.total);

        let due = self
            .last_draw
            .is_none_or(|last| last.elapsed() >= self.redraw_interval);
        if due || self.current == self.total {
            self.draw();
        }
    }

    pub fn increment(&mut self) {
        self.update(self.current + 1);
    }

    /// Draw the completed bar and end the line.
    pub fn finish(&mut self) {
        if self.enabled {
            self.current = self.total;
            self.draw();
            eprintln!();
        }
    }

    /// Erase the bar from the terminal.
    pub fn clear(&self) {
        if self.enabled {
            eprint!("\r\x1b[K");
            io::stderr().flush().ok();
        }
    }

    fn draw(&mut self) {
        self.last_draw = Some(Instant::now());
        if !self.enabled {
            return;
        }

        eprint!("\r{}", self.render_line());
        io::stderr().flush().ok();
    }

    /// The text of the bar at its current position.
    pub fn render_line(&self) -> String {
        let counter = format!("{}/{}", self.current, self.total);

        let body = match self.style {
            ProgressStyle::Counter => counter,
            ProgressStyle::Bar => {
                let filled = BAR_WIDTH * self.current / self.total.max(1);
                let head = if filled > 0 && filled < BAR_WIDTH {
                    ">"
                } else {
                    ""
                };
                let body = "=".repeat(filled.saturating_sub(head.len()));
                let percent = 100 * self.current / self.total.max(1);
                format!(
                    "[{body}{head}{}] {percent:>3}% {counter} {}",
                    " ".repeat(BAR_WIDTH - filled),
                    format_duration(self.start_time.elapsed())
                )
            }
        };

        match &self.message {
            Some(message) => format!("{message} {body}"),
            None => body,
        }
    }
}

/// Format a duration as `0.4s`, `12s` or `2m05s`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else if secs >= 10 {
        format!("{secs}s")
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}
