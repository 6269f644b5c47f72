//! PostgreSQL implementation of [`AdminStore`].
//!
//! Each call checks out one pooled connection, runs its statements on it, and returns it to the
//! pool when the guard drops, on success and on error alike.
//!
//! Identifier columns are compared as `::text` so the same statements work whether the schema
//! stores identifiers as `uuid` or as text. Other columns are cast to fixed types (text, `int4`,
//! `float8`, `timestamptz`) so decoding does not depend on the exact column types in use.

use super::AdminStore;
use crate::config::{DatabaseConfig, PoolSettings};
use crate::error::AdminResult;
use crate::ids::PractitionerIds;
use crate::rows::{DiagnosisRow, PatientRow, StatsSnapshot, StatusCountRow};
use async_trait::async_trait;
use sqlx::PgPool;

const PATIENT_COLUMNS: &str = "
    patient_id, gender::text AS gender, age::int4 AS age, practitioner_id,
    created_at::timestamptz AS created_at";

const DIAGNOSIS_COLUMNS: &str = "
    diagnosis_id, patient_id, practitioner_id, age::int4 AS age, gender::text AS gender,
    respiratory_rate::float8 AS respiratory_rate,
    oxygen_saturation::float8 AS oxygen_saturation,
    height::float8 AS height,
    weight::float8 AS weight,
    heart_rate::float8 AS heart_rate,
    temperature::float8 AS temperature,
    lung_sound::text AS lung_sound,
    presenting_symptoms::text AS presenting_symptoms,
    diagnosis_summary::text AS diagnosis_summary,
    doctor_notes::text AS doctor_notes,
    chat_history::text AS chat_history,
    status::text AS status,
    diagnosis_date::timestamptz AS diagnosis_date,
    created_at::timestamptz AS created_at,
    updated_at::timestamptz AS updated_at";

/// Connect a pool eagerly so bad credentials fail at startup rather than on the first request.
///
/// # Errors
/// Returns `AdminError::DataAccess` if the first connection cannot be established.
pub async fn connect_pool(db: &DatabaseConfig, pool: &PoolSettings) -> AdminResult<PgPool> {
    let pool = pool
        .pool_options()
        .connect_with(db.connect_options())
        .await?;
    Ok(pool)
}

#[derive(Clone, Debug)]
pub struct PgAdminStore {
    pool: PgPool,
}

impl PgAdminStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminStore for PgAdminStore {
    async fn patients_for_practitioners(
        &self,
        ids: &PractitionerIds,
    ) -> AdminResult<Vec<PatientRow>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {PATIENT_COLUMNS}
             FROM patients
             WHERE practitioner_id::text = ANY($1)
             ORDER BY created_at DESC"
        );
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, PatientRow>(&sql)
            .bind(ids.as_slice())
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    async fn diagnoses_for_practitioners(
        &self,
        ids: &PractitionerIds,
    ) -> AdminResult<Vec<DiagnosisRow>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {DIAGNOSIS_COLUMNS}
             FROM diagnoses
             WHERE practitioner_id::text = ANY($1)
             ORDER BY diagnosis_date DESC"
        );
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, DiagnosisRow>(&sql)
            .bind(ids.as_slice())
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    async fn diagnoses_for_patient(&self, patient_id: &str) -> AdminResult<Vec<DiagnosisRow>> {
        let sql = format!(
            "SELECT {DIAGNOSIS_COLUMNS}
             FROM diagnoses
             WHERE patient_id::text = $1
             ORDER BY diagnosis_date DESC"
        );
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, DiagnosisRow>(&sql)
            .bind(patient_id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    async fn diagnosis_by_id(&self, diagnosis_id: &str) -> AdminResult<Option<DiagnosisRow>> {
        let sql = format!(
            "SELECT {DIAGNOSIS_COLUMNS}
             FROM diagnoses
             WHERE diagnosis_id::text = $1
             LIMIT 1"
        );
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, DiagnosisRow>(&sql)
            .bind(diagnosis_id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn practitioner_stats(&self, ids: &PractitionerIds) -> AdminResult<StatsSnapshot> {
        if ids.is_empty() {
            return Ok(StatsSnapshot::default());
        }

        let mut conn = self.pool.acquire().await?;

        let distinct_patients: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT patient_id)
             FROM patients
             WHERE practitioner_id::text = ANY($1)",
        )
        .bind(ids.as_slice())
        .fetch_one(&mut *conn)
        .await?;

        let total_diagnoses: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)
             FROM diagnoses
             WHERE practitioner_id::text = ANY($1)",
        )
        .bind(ids.as_slice())
        .fetch_one(&mut *conn)
        .await?;

        let status_rows = sqlx::query_as::<_, StatusCountRow>(
            "SELECT status::text AS status, COUNT(*) AS count
             FROM diagnoses
             WHERE practitioner_id::text = ANY($1)
             GROUP BY status",
        )
        .bind(ids.as_slice())
        .fetch_all(&mut *conn)
        .await?;

        Ok(StatsSnapshot {
            distinct_patients,
            total_diagnoses,
            status_rows,
        })
    }

    async fn practitioner_exists(&self, practitioner_id: &str) -> AdminResult<bool> {
        let mut conn = self.pool.acquire().await?;
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM patients WHERE practitioner_id::text = $1)
                 OR EXISTS (SELECT 1 FROM diagnoses WHERE practitioner_id::text = $1)",
        )
        .bind(practitioner_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(exists)
    }

    async fn ping(&self) -> AdminResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}
