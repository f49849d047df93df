// Upload loop: walks a pack in order and registers every record through a
// `Registrar`, stopping at the first failure.

use crate::api::Registrar;
use crate::error::PackError;
use crate::pack::{record_name, Pack, RecordKind};
use crate::ui::Reporter;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

/// Counts from a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub chips: usize,
    pub programs: usize,
}

impl UploadSummary {
    pub fn total(&self) -> usize {
        self.chips + self.programs
    }
}

/// Register every record of `pack`: all chips first, then all programs.
///
/// An empty pack fails with [`PackError::Empty`] before anything is sent.
/// The first registration error aborts the run; lines already written to
/// the reporter are left as they are and nothing is retried.
pub fn upload_pack<R, W>(registrar: &R, pack: &Pack, reporter: &mut Reporter<W>) -> Result<UploadSummary>
where
    R: Registrar + ?Sized,
    W: Write,
{
    if pack.is_empty() {
        return Err(PackError::Empty.into());
    }

    let mut summary = UploadSummary::default();
    for (kind, record) in pack.records() {
        let name = record_name(record);
        reporter.start(kind, name.as_deref());
        let result = registrar
            .register(kind, record)
            .with_context(|| format!("failed to register {} {}", kind, name.as_deref().unwrap_or("?")))?;
        reporter
            .record(kind, name.as_deref(), result.hash.as_deref())
            .context("failed to write progress line")?;
        match kind {
            RecordKind::Chip => summary.chips += 1,
            RecordKind::Program => summary.programs += 1,
        }
    }
    reporter.finish();

    info!(
        chips = summary.chips,
        programs = summary.programs,
        "registered {} records",
        summary.total()
    );
    Ok(summary)
}
