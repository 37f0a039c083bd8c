//! Write operations for the `mobilepost` table.

use mpo_core::{NormalizedRecord, UpsertOutcome};
use sqlx::MySqlConnection;

/// Column order matches the table definition in `db/schema.sql`. Key
/// columns (`mobileCode`, `dayOfWeekCode`, `seq`) are inserted but never
/// updated; every non-key column is overwritten on conflict, so an update
/// fully replaces the row rather than merging.
const UPSERT_SQL: &str = "INSERT INTO mobilepost (\
       mobileCode, locationTC, locationSC, addressTC, \
       nameSC, districtSC, addressSC, closeHour, \
       nameTC, districtTC, latitude, openHour, dayOfWeekCode, \
       nameEN, districtEN, locationEN, addressEN, seq, longitude\
     ) VALUES (?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?) \
     ON DUPLICATE KEY UPDATE \
       locationTC = VALUES(locationTC), \
       locationSC = VALUES(locationSC), \
       addressTC  = VALUES(addressTC), \
       nameSC     = VALUES(nameSC), \
       districtSC = VALUES(districtSC), \
       addressSC  = VALUES(addressSC), \
       closeHour  = VALUES(closeHour), \
       nameTC     = VALUES(nameTC), \
       districtTC = VALUES(districtTC), \
       latitude   = VALUES(latitude), \
       openHour   = VALUES(openHour), \
       nameEN     = VALUES(nameEN), \
       districtEN = VALUES(districtEN), \
       locationEN = VALUES(locationEN), \
       addressEN  = VALUES(addressEN), \
       longitude  = VALUES(longitude)";

/// Map MySQL's affected-rows signal for `ON DUPLICATE KEY UPDATE` to an
/// outcome: 1 = row inserted, 2 = existing row updated, 0 = existing row
/// already identical (no-op write). Requires the connection to be opened
/// without `CLIENT_FOUND_ROWS`, which is sqlx's default.
#[must_use]
pub fn classify_rows_affected(rows_affected: u64) -> UpsertOutcome {
    match rows_affected {
        1 => UpsertOutcome::Inserted,
        2 => UpsertOutcome::Updated,
        _ => UpsertOutcome::Unchanged,
    }
}

/// Upsert one record keyed on `(mobileCode, dayOfWeekCode, seq)`.
///
/// Idempotent: re-applying an identical record reports `Unchanged` and
/// leaves the row untouched. Runs on the caller's connection so the whole
/// import shares one transaction.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the statement fails. The caller records the
/// failure against this record and continues; a MySQL statement error does
/// not poison the enclosing transaction.
pub async fn upsert_office(
    conn: &mut MySqlConnection,
    record: &NormalizedRecord,
) -> Result<UpsertOutcome, sqlx::Error> {
    let result = sqlx::query(UPSERT_SQL)
        .bind(&record.mobile_code)
        .bind(&record.location_tc)
        .bind(&record.location_sc)
        .bind(&record.address_tc)
        .bind(&record.name_sc)
        .bind(&record.district_sc)
        .bind(&record.address_sc)
        .bind(record.close_hour.as_deref())
        .bind(&record.name_tc)
        .bind(&record.district_tc)
        .bind(record.latitude)
        .bind(record.open_hour.as_deref())
        .bind(record.day_of_week_code)
        .bind(&record.name_en)
        .bind(&record.district_en)
        .bind(&record.location_en)
        .bind(&record.address_en)
        .bind(record.seq)
        .bind(record.longitude)
        .execute(conn)
        .await?;

    Ok(classify_rows_affected(result.rows_affected()))
}
