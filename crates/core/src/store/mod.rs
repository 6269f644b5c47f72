//! Data access layer.
//!
//! [`AdminStore`] is the seam between request handling and storage. The PostgreSQL
//! implementation lives in [`postgres`]; tests substitute an in-memory store.
//!
//! Every method is a read. Implementations return rows verbatim and surface any failure as
//! [`AdminError::DataAccess`](crate::AdminError::DataAccess) without retrying.

pub mod postgres;

use crate::error::AdminResult;
use crate::ids::PractitionerIds;
use crate::rows::{DiagnosisRow, PatientRow, StatsSnapshot};
use async_trait::async_trait;

pub use postgres::PgAdminStore;

#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Patients owned by any practitioner in `ids`, newest first.
    async fn patients_for_practitioners(
        &self,
        ids: &PractitionerIds,
    ) -> AdminResult<Vec<PatientRow>>;

    /// Diagnoses owned by any practitioner in `ids`, most recent diagnosis first.
    async fn diagnoses_for_practitioners(
        &self,
        ids: &PractitionerIds,
    ) -> AdminResult<Vec<DiagnosisRow>>;

    /// Diagnoses for one patient, most recent diagnosis first.
    async fn diagnoses_for_patient(&self, patient_id: &str) -> AdminResult<Vec<DiagnosisRow>>;

    async fn diagnosis_by_id(&self, diagnosis_id: &str) -> AdminResult<Option<DiagnosisRow>>;

    /// Distinct patients, total diagnoses, and diagnoses grouped by status for `ids`.
    ///
    /// The three figures are read independently; they need not come from one snapshot.
    async fn practitioner_stats(&self, ids: &PractitionerIds) -> AdminResult<StatsSnapshot>;

    /// Whether the identifier owns at least one patient or at least one diagnosis.
    async fn practitioner_exists(&self, practitioner_id: &str) -> AdminResult<bool>;

    /// Round-trip a trivial statement to confirm the store is reachable.
    async fn ping(&self) -> AdminResult<()>;
}
