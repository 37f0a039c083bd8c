//! Domain logic for the HK Post mobile office importer.
//!
//! Everything here is pure: loading and shaping the JSON dataset,
//! normalizing loosely-typed source fields into the exact column set the
//! `mobilepost` table expects, and accumulating per-record outcomes into
//! the final run report. Database access lives in `mpo-db`.

pub mod dataset;
pub mod normalize;
pub mod record;
pub mod report;

pub use dataset::{load_dataset, Dataset, DatasetError};
pub use normalize::{coerce_float, coerce_int, display_string, normalize_time, NormalizeError};
pub use record::{stage_record, NormalizedRecord, RecordKey, SourceRecord, Staged};
pub use report::{ErrorSample, ImportOutput, RunReport, Summary, UpsertOutcome};
