//! The import driver: load the dataset, stage each record, upsert, and
//! fold outcomes into the final report.
//!
//! Per-record failures (bad numeric field, statement error) are recorded
//! and skipped so one bad record never aborts the run. Only dataset-level
//! failures (missing file, invalid JSON, zero rows) and connection-level
//! failures end the run early — the former with a structured failure
//! report, the latter by propagating.

use std::process::ExitCode;

use mpo_core::{load_dataset, stage_record, Dataset, ImportOutput, RunReport, Staged};
use mpo_db::{ConnectParams, PoolConfig};
use sqlx::MySqlPool;

use crate::Cli;

pub(crate) async fn run(args: &Cli) -> anyhow::Result<ExitCode> {
    let dataset = match load_dataset(&args.file) {
        Ok(dataset) => dataset,
        Err(err) => return emit_failure(&err.to_string()),
    };
    if dataset.records.is_empty() {
        return emit_failure("No records to import");
    }

    let pool = if args.dry_run {
        None
    } else {
        let params = ConnectParams {
            host: args.host.clone(),
            user: args.user.clone(),
            password: args.password.clone(),
            database: args.database.clone(),
        };
        // A connection-level failure is fatal and propagates as-is: no
        // report is emitted and nothing was written.
        let pool = mpo_db::connect_pool(&params, PoolConfig::from_env()).await?;
        mpo_db::ping(&pool).await?;
        Some(pool)
    };

    let result = run_import(pool.as_ref(), &dataset).await;

    // Release the connection explicitly even when the loop or the commit
    // failed, before any error propagates.
    if let Some(pool) = pool {
        pool.close().await;
    }
    let report = result?;

    println!("{}", serde_json::to_string(&ImportOutput::from(report))?);
    Ok(ExitCode::SUCCESS)
}

/// Feed every record through staging and (unless dry-run) the upsert.
///
/// `pool: None` means dry-run: records are still validated and counted,
/// but storage is never contacted. Otherwise all writes happen inside one
/// transaction committed after the loop; row-level statement errors are
/// recorded and do not roll it back.
pub(crate) async fn run_import(
    pool: Option<&MySqlPool>,
    dataset: &Dataset,
) -> anyhow::Result<RunReport> {
    let mut report = RunReport::new(dataset.last_update_date.clone());

    let mut tx = match pool {
        Some(pool) => Some(pool.begin().await?),
        None => None,
    };

    for (index, record) in dataset.records.iter().enumerate() {
        report.record_read();

        let (key, normalized) = match stage_record(record) {
            Staged::Skipped => {
                report.record_skipped();
                continue;
            }
            Staged::Invalid { key, error } => {
                tracing::warn!(index, error = %error, "record failed normalization");
                report.record_error(index, key, error);
                continue;
            }
            Staged::Ready {
                key,
                record: normalized,
            } => (key, normalized),
        };

        let Some(tx) = tx.as_mut() else {
            // Dry-run: validated, never written.
            continue;
        };

        match mpo_db::upsert_office(&mut **tx, &normalized).await {
            Ok(outcome) => report.record_upsert(outcome),
            Err(err) => {
                tracing::warn!(index, error = %err, "upsert failed; continuing");
                // Sample the raw key so both error paths render source values.
                report.record_error(index, key, err);
            }
        }
    }

    if let Some(tx) = tx {
        tx.commit().await?;
    }

    let summary = report.summary();
    tracing::info!(
        read = summary.read,
        inserted = summary.inserted,
        updated = summary.updated,
        unchanged = summary.unchanged,
        skipped = summary.skipped,
        errors = summary.errors,
        "import finished"
    );

    Ok(report)
}

fn emit_failure(message: &str) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string(&ImportOutput::failure(message))?);
    Ok(ExitCode::FAILURE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "import_test.rs"]
mod tests;
