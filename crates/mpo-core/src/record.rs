//! Source records, key validation, and staging into normalized rows.

use serde::Deserialize;
use serde_json::Value;

use crate::normalize::{
    coerce_float, coerce_int, display_string, is_falsy, normalize_time, value_to_string,
    NormalizeError,
};

/// One raw dataset entry. Every field is kept as a `serde_json::Value`
/// because the upstream feed is loosely typed: codes arrive as strings or
/// numbers, coordinates as numbers or strings, and any field may be
/// missing (deserialized as `Null` via `#[serde(default)]`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceRecord {
    #[serde(rename = "mobileCode")]
    pub mobile_code: Value,
    #[serde(rename = "dayOfWeekCode")]
    pub day_of_week_code: Value,
    pub seq: Value,
    #[serde(rename = "nameTC")]
    pub name_tc: Value,
    #[serde(rename = "nameSC")]
    pub name_sc: Value,
    #[serde(rename = "nameEN")]
    pub name_en: Value,
    #[serde(rename = "districtTC")]
    pub district_tc: Value,
    #[serde(rename = "districtSC")]
    pub district_sc: Value,
    #[serde(rename = "districtEN")]
    pub district_en: Value,
    #[serde(rename = "locationTC")]
    pub location_tc: Value,
    #[serde(rename = "locationSC")]
    pub location_sc: Value,
    #[serde(rename = "locationEN")]
    pub location_en: Value,
    #[serde(rename = "addressTC")]
    pub address_tc: Value,
    #[serde(rename = "addressSC")]
    pub address_sc: Value,
    #[serde(rename = "addressEN")]
    pub address_en: Value,
    #[serde(rename = "openHour")]
    pub open_hour: Value,
    #[serde(rename = "closeHour")]
    pub close_hour: Value,
    pub latitude: Value,
    pub longitude: Value,
}

/// The composite business key as it appears in error samples:
/// `[mobileCode, dayOfWeekCode, seq]`. Day and seq stay raw JSON values so
/// a key can be reported even when integer coercion failed.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RecordKey(pub String, pub Value, pub Value);

/// A fully validated row matching the `mobilepost` column set.
///
/// Only constructible through [`stage_record`]: existence of a value of
/// this type implies the composite key was present and well-typed.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub mobile_code: String,
    pub day_of_week_code: i32,
    pub seq: i32,
    pub name_tc: String,
    pub name_sc: String,
    pub name_en: String,
    pub district_tc: String,
    pub district_sc: String,
    pub district_en: String,
    pub location_tc: String,
    pub location_sc: String,
    pub location_en: String,
    pub address_tc: String,
    pub address_sc: String,
    pub address_en: String,
    pub open_hour: Option<String>,
    pub close_hour: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Result of staging one source record.
///
/// Both non-skip variants carry the raw-valued [`RecordKey`] so error
/// samples always render the source values, whether the failure happens
/// during normalization or later at the upsert.
#[derive(Debug)]
pub enum Staged {
    /// The composite key is missing or falsy. Counted, never sampled.
    Skipped,
    /// Ready for upsert.
    Ready {
        key: RecordKey,
        record: NormalizedRecord,
    },
    /// Key present but a field failed normalization. A per-record error.
    Invalid {
        key: RecordKey,
        error: NormalizeError,
    },
}

/// Validate the composite key and normalize the remaining fields.
///
/// Key rules: `mobileCode` must be truthy; `dayOfWeekCode` and `seq` must
/// not be null or absent (an explicit `0` is valid). A key failure is a
/// skip. Once the key is confirmed present, any coercion failure —
/// non-integral day/seq, non-numeric coordinate — is an error instead.
#[must_use]
pub fn stage_record(record: &SourceRecord) -> Staged {
    if is_falsy(&record.mobile_code)
        || record.day_of_week_code.is_null()
        || record.seq.is_null()
    {
        return Staged::Skipped;
    }

    let key = RecordKey(
        value_to_string(&record.mobile_code),
        record.day_of_week_code.clone(),
        record.seq.clone(),
    );

    match normalize_record(record, &key) {
        Ok(normalized) => Staged::Ready {
            key,
            record: normalized,
        },
        Err(error) => Staged::Invalid { key, error },
    }
}

fn normalize_record(
    record: &SourceRecord,
    key: &RecordKey,
) -> Result<NormalizedRecord, NormalizeError> {
    Ok(NormalizedRecord {
        mobile_code: key.0.clone(),
        day_of_week_code: coerce_int("dayOfWeekCode", &record.day_of_week_code)?,
        seq: coerce_int("seq", &record.seq)?,
        name_tc: display_string(&record.name_tc),
        name_sc: display_string(&record.name_sc),
        name_en: display_string(&record.name_en),
        district_tc: display_string(&record.district_tc),
        district_sc: display_string(&record.district_sc),
        district_en: display_string(&record.district_en),
        location_tc: display_string(&record.location_tc),
        location_sc: display_string(&record.location_sc),
        location_en: display_string(&record.location_en),
        address_tc: display_string(&record.address_tc),
        address_sc: display_string(&record.address_sc),
        address_en: display_string(&record.address_en),
        open_hour: normalize_time(&record.open_hour),
        close_hour: normalize_time(&record.close_hour),
        latitude: coerce_float("latitude", &record.latitude)?,
        longitude: coerce_float("longitude", &record.longitude)?,
    })
}
