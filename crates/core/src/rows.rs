//! Raw rows as read from the `patients` and `diagnoses` tables.
//!
//! These types keep storage representations as they are (identifiers that may be UUIDs, chat
//! history as undecoded text). The `normalise` module turns them into response records.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use std::fmt;
use uuid::Uuid;

/// An identifier column that may be stored as `uuid` or as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawId {
    Uuid(Uuid),
    Text(String),
}

impl RawId {
    /// Canonical string form. UUIDs render hyphenated and lowercase.
    pub fn into_string(self) -> String {
        match self {
            RawId::Uuid(uuid) => uuid.hyphenated().to_string(),
            RawId::Text(text) => text,
        }
    }

    /// Decode `column` as a UUID, falling back to text when the column is not a `uuid`.
    pub(crate) fn try_get(row: &PgRow, column: &str) -> Result<Self, sqlx::Error> {
        match row.try_get::<Uuid, _>(column) {
            Ok(uuid) => Ok(RawId::Uuid(uuid)),
            Err(sqlx::Error::ColumnDecode { .. }) => {
                row.try_get::<String, _>(column).map(RawId::Text)
            }
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Uuid(uuid) => write!(f, "{}", uuid.hyphenated()),
            RawId::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        RawId::Text(value.to_string())
    }
}

impl From<Uuid> for RawId {
    fn from(value: Uuid) -> Self {
        RawId::Uuid(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatientRow {
    pub patient_id: RawId,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub practitioner_id: RawId,
    pub created_at: Option<DateTime<Utc>>,
}

impl<'r> FromRow<'r, PgRow> for PatientRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            patient_id: RawId::try_get(row, "patient_id")?,
            gender: row.try_get("gender")?,
            age: row.try_get("age")?,
            practitioner_id: RawId::try_get(row, "practitioner_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiagnosisRow {
    pub diagnosis_id: RawId,
    pub patient_id: RawId,
    pub practitioner_id: RawId,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub respiratory_rate: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub heart_rate: Option<f64>,
    pub temperature: Option<f64>,
    pub lung_sound: Option<String>,
    pub presenting_symptoms: Option<String>,
    pub diagnosis_summary: Option<String>,
    pub doctor_notes: Option<String>,
    /// Serialised JSON as stored; decoded by the normaliser.
    pub chat_history: Option<String>,
    pub status: Option<String>,
    pub diagnosis_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<'r> FromRow<'r, PgRow> for DiagnosisRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            diagnosis_id: RawId::try_get(row, "diagnosis_id")?,
            patient_id: RawId::try_get(row, "patient_id")?,
            practitioner_id: RawId::try_get(row, "practitioner_id")?,
            age: row.try_get("age")?,
            gender: row.try_get("gender")?,
            respiratory_rate: row.try_get("respiratory_rate")?,
            oxygen_saturation: row.try_get("oxygen_saturation")?,
            height: row.try_get("height")?,
            weight: row.try_get("weight")?,
            heart_rate: row.try_get("heart_rate")?,
            temperature: row.try_get("temperature")?,
            lung_sound: row.try_get("lung_sound")?,
            presenting_symptoms: row.try_get("presenting_symptoms")?,
            diagnosis_summary: row.try_get("diagnosis_summary")?,
            doctor_notes: row.try_get("doctor_notes")?,
            chat_history: row.try_get("chat_history")?,
            status: row.try_get("status")?,
            diagnosis_date: row.try_get("diagnosis_date")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// One `GROUP BY status` result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusCountRow {
    pub status: Option<String>,
    pub count: i64,
}

impl<'r> FromRow<'r, PgRow> for StatusCountRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            status: row.try_get("status")?,
            count: row.try_get("count")?,
        })
    }
}

/// Raw aggregate figures for a practitioner set, before bucketing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub distinct_patients: i64,
    pub total_diagnoses: i64,
    pub status_rows: Vec<StatusCountRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_id_uuid_renders_hyphenated_lowercase() {
        let uuid = Uuid::parse_str("550E8400E29B41D4A716446655440000").unwrap();
        assert_eq!(
            RawId::from(uuid).into_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_raw_id_text_passes_through() {
        let id = RawId::from("pr1");
        assert_eq!(id.to_string(), "pr1");
        assert_eq!(id.into_string(), "pr1");
    }
}
