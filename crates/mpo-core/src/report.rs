//! The per-run report accumulator and the final stdout document.

use std::fmt::Display;

use serde::Serialize;

use crate::record::RecordKey;

/// At most this many per-record errors are retained for the report; the
/// `errors` counter keeps counting past the cap.
pub const MAX_ERROR_SAMPLES: usize = 5;

/// Outcome of applying one normalized record against storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No row with this key existed; one was inserted.
    Inserted,
    /// A row existed and at least one non-key column changed.
    Updated,
    /// A row existed and already matched; the write was a no-op.
    Unchanged,
}

/// One retained per-record error: the record's position in the file, its
/// composite key, and the failure message.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorSample {
    pub index: usize,
    pub key: RecordKey,
    pub error: String,
}

/// Summary counters, serialized inside the final report.
///
/// `lastUpdateDate` is a passthrough of the dataset's own stamp and
/// serializes as `null` when the file did not declare one.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub read: u64,
    pub inserted: u64,
    pub updated: u64,
    pub unchanged: u64,
    pub skipped: u64,
    pub errors: u64,
    #[serde(rename = "lastUpdateDate")]
    pub last_update_date: Option<String>,
}

/// Mutable run state, owned by the driver and folded once per record.
#[derive(Debug)]
pub struct RunReport {
    summary: Summary,
    sample_errors: Vec<ErrorSample>,
}

impl RunReport {
    #[must_use]
    pub fn new(last_update_date: Option<String>) -> Self {
        Self {
            summary: Summary {
                read: 0,
                inserted: 0,
                updated: 0,
                unchanged: 0,
                skipped: 0,
                errors: 0,
                last_update_date,
            },
            sample_errors: Vec::new(),
        }
    }

    pub fn record_read(&mut self) {
        self.summary.read += 1;
    }

    pub fn record_skipped(&mut self) {
        self.summary.skipped += 1;
    }

    pub fn record_upsert(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted => self.summary.inserted += 1,
            UpsertOutcome::Updated => self.summary.updated += 1,
            UpsertOutcome::Unchanged => self.summary.unchanged += 1,
        }
    }

    /// Count a per-record error, retaining a sample while under the cap.
    pub fn record_error(&mut self, index: usize, key: RecordKey, error: impl Display) {
        self.summary.errors += 1;
        if self.sample_errors.len() < MAX_ERROR_SAMPLES {
            self.sample_errors.push(ErrorSample {
                index,
                key,
                error: error.to_string(),
            });
        }
    }

    #[must_use]
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    #[must_use]
    pub fn sample_errors(&self) -> &[ErrorSample] {
        &self.sample_errors
    }
}

/// The single JSON document written to stdout at the end of a run.
///
/// Success runs carry `summary` and `sampleErrors` (always present, possibly
/// empty); top-level failures carry only `message`.
#[derive(Debug, Serialize)]
pub struct ImportOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(rename = "sampleErrors", skip_serializing_if = "Option::is_none")]
    pub sample_errors: Option<Vec<ErrorSample>>,
}

impl ImportOutput {
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            summary: None,
            sample_errors: None,
        }
    }
}

impl From<RunReport> for ImportOutput {
    fn from(report: RunReport) -> Self {
        Self {
            success: true,
            message: None,
            summary: Some(report.summary),
            sample_errors: Some(report.sample_errors),
        }
    }
}
