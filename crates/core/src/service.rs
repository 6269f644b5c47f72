//! Read operations behind the admin endpoints.
//!
//! [`AdminService`] owns the per-endpoint flow: empty practitioner sets short-circuit before the
//! store is touched, rows pass through the normaliser, and stats go through the aggregator.

use crate::error::{AdminError, AdminResult};
use crate::ids::PractitionerIds;
use crate::normalise::{normalise_diagnosis, normalise_patient};
use crate::stats::summarise;
use crate::store::AdminStore;
use api_shared::{DiagnosisRecord, PatientRecord, PractitionerStatsRes, ValidatePractitionerRes};
use std::sync::Arc;

#[derive(Clone)]
pub struct AdminService {
    store: Arc<dyn AdminStore>,
}

impl AdminService {
    pub fn new(store: Arc<dyn AdminStore>) -> Self {
        Self { store }
    }

    /// Patients for a practitioner set. An empty set yields an empty list without a query.
    pub async fn patients(&self, ids: &PractitionerIds) -> AdminResult<Vec<PatientRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self.store.patients_for_practitioners(ids).await?;
        Ok(rows.into_iter().map(normalise_patient).collect())
    }

    /// Normalised diagnoses for a practitioner set. An empty set yields an empty list without a
    /// query.
    pub async fn diagnoses(&self, ids: &PractitionerIds) -> AdminResult<Vec<DiagnosisRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self.store.diagnoses_for_practitioners(ids).await?;
        Ok(rows.into_iter().map(normalise_diagnosis).collect())
    }

    /// Normalised diagnoses for one patient. An unknown patient is not an error.
    pub async fn patient_diagnoses(&self, patient_id: &str) -> AdminResult<Vec<DiagnosisRecord>> {
        let rows = self.store.diagnoses_for_patient(patient_id).await?;
        Ok(rows.into_iter().map(normalise_diagnosis).collect())
    }

    /// A single normalised diagnosis.
    ///
    /// # Errors
    /// Returns `AdminError::NotFound` if no diagnosis has this identifier.
    pub async fn diagnosis(&self, diagnosis_id: &str) -> AdminResult<DiagnosisRecord> {
        self.store
            .diagnosis_by_id(diagnosis_id)
            .await?
            .map(normalise_diagnosis)
            .ok_or_else(|| AdminError::NotFound("Diagnosis".into()))
    }

    /// Aggregate figures for a practitioner set. An empty set yields the all-zero summary
    /// without a query.
    pub async fn stats(&self, ids: &PractitionerIds) -> AdminResult<PractitionerStatsRes> {
        if ids.is_empty() {
            return Ok(PractitionerStatsRes::default());
        }
        let snapshot = self.store.practitioner_stats(ids).await?;
        Ok(summarise(ids, &snapshot))
    }

    /// Existence by association: the identifier owns a patient or a diagnosis.
    ///
    /// This does not consult a practitioner registry and must not be used for authentication.
    pub async fn validate_practitioner(
        &self,
        practitioner_id: &str,
    ) -> AdminResult<ValidatePractitionerRes> {
        let exists = self.store.practitioner_exists(practitioner_id).await?;
        Ok(ValidatePractitionerRes { exists })
    }

    /// Whether the store answers a trivial query.
    pub async fn database_reachable(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("database health check failed: {}", e);
                false
            }
        }
    }
}
