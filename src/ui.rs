// Output layer: one progress line per registered record on stdout, plus an
// `indicatif` spinner on stderr while requests are in flight. The spinner
// draws nothing when stderr is not a terminal, so piped output stays clean.

use crate::pack::RecordKind;
use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};
use std::io::{self, Write};

/// Width the record name is right-aligned to.
pub const NAME_WIDTH: usize = 24;

/// Format the line printed after a record is registered, e.g.
/// `chip                     adder  -> abc123`. Missing values print as `?`.
pub fn progress_line(kind: RecordKind, name: Option<&str>, hash: Option<&str>) -> String {
    format!(
        "{}  {:>width$}  -> {}",
        kind.label(),
        name.unwrap_or("?"),
        hash.unwrap_or("?"),
        width = NAME_WIDTH
    )
}

/// Writes progress lines to `out` and keeps the spinner in sync.
pub struct Reporter<W: Write> {
    out: W,
    bar: ProgressBar,
}

impl<W: Write> Reporter<W> {
    /// Reporter with a spinner on stderr counting up to `total` records.
    /// The spinner clears itself when dropped, including on error paths.
    pub fn new(out: W, total: u64) -> Self {
        let bar = ProgressBar::new(total).with_finish(ProgressFinish::AndClear);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Reporter { out, bar }
    }

    /// Reporter without any spinner.
    pub fn hidden(out: W) -> Self {
        Reporter {
            out,
            bar: ProgressBar::hidden(),
        }
    }

    /// Show which record is being sent.
    pub fn start(&self, kind: RecordKind, name: Option<&str>) {
        self.bar
            .set_message(format!("Registering {} {}...", kind, name.unwrap_or("?")));
    }

    /// Print the line for a registered record.
    pub fn record(&mut self, kind: RecordKind, name: Option<&str>, hash: Option<&str>) -> io::Result<()> {
        let line = progress_line(kind, name, hash);
        let out = &mut self.out;
        self.bar.suspend(|| {
            writeln!(out, "{line}")?;
            out.flush()
        })?;
        self.bar.inc(1);
        Ok(())
    }

    /// Clear the spinner. Lines already printed stay on stdout.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn into_inner(self) -> W {
        self.bar.finish_and_clear();
        self.out
    }
}
