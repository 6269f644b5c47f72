//! In-memory [`AdminStore`] for tests.
//!
//! Counts every store call so tests can assert that short-circuits never reach storage, and can
//! be switched into a failing mode to exercise data-access error paths. Listings come back in the
//! same order as the PostgreSQL store: newest first, with undated rows ahead of dated ones as
//! `ORDER BY ... DESC` places nulls.

use crate::error::{AdminError, AdminResult};
use crate::ids::PractitionerIds;
use crate::rows::{DiagnosisRow, PatientRow, RawId, StatsSnapshot, StatusCountRow};
use crate::store::AdminStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering as CmpOrdering;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryStore {
    patients: Mutex<Vec<PatientRow>>,
    diagnoses: Mutex<Vec<DiagnosisRow>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryStore {
    /// One patient `p1` owned by `pr1`, with one complete diagnosis `d1` whose chat history is
    /// `[{"role":"user"}]`.
    pub fn seeded() -> Self {
        let store = Self::default();
        store.push_patient("p1", "pr1");
        store.push_diagnosis("d1", "p1", "pr1", Some(r#"[{"role":"user"}]"#), Some("complete"));
        store
    }

    pub fn push_patient(&self, patient_id: &str, practitioner_id: &str) {
        self.push_patient_row(PatientRow {
            patient_id: RawId::from(patient_id),
            gender: Some("female".into()),
            age: Some(40),
            practitioner_id: RawId::from(practitioner_id),
            created_at: None,
        });
    }

    pub fn push_patient_row(&self, row: PatientRow) {
        self.patients.lock().unwrap().push(row);
    }

    pub fn push_diagnosis(
        &self,
        diagnosis_id: &str,
        patient_id: &str,
        practitioner_id: &str,
        chat_history: Option<&str>,
        status: Option<&str>,
    ) {
        self.push_diagnosis_row(Self::diagnosis_row(
            diagnosis_id,
            patient_id,
            practitioner_id,
            chat_history,
            status,
        ));
    }

    /// An undated diagnosis row with no vitals, for tests that adjust fields before pushing.
    pub fn diagnosis_row(
        diagnosis_id: &str,
        patient_id: &str,
        practitioner_id: &str,
        chat_history: Option<&str>,
        status: Option<&str>,
    ) -> DiagnosisRow {
        DiagnosisRow {
            diagnosis_id: RawId::from(diagnosis_id),
            patient_id: RawId::from(patient_id),
            practitioner_id: RawId::from(practitioner_id),
            age: Some(40),
            gender: Some("female".into()),
            respiratory_rate: None,
            oxygen_saturation: None,
            height: None,
            weight: None,
            heart_rate: None,
            temperature: None,
            lung_sound: None,
            presenting_symptoms: None,
            diagnosis_summary: None,
            doctor_notes: None,
            chat_history: chat_history.map(str::to_string),
            status: status.map(str::to_string),
            diagnosis_date: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn push_diagnosis_row(&self, row: DiagnosisRow) {
        self.diagnoses.lock().unwrap().push(row);
    }

    /// Number of store methods invoked so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every later call fail with a data-access error.
    pub fn fail_next_calls(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn enter(&self) -> AdminResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AdminError::DataAccess(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn owned_by(ids: &PractitionerIds, owner: &RawId) -> bool {
        let owner = owner.to_string();
        ids.as_slice().iter().any(|id| *id == owner)
    }

    fn by_diagnosis_date(mut rows: Vec<DiagnosisRow>) -> Vec<DiagnosisRow> {
        rows.sort_by(|a, b| newest_first(a.diagnosis_date, b.diagnosis_date));
        rows
    }
}

/// PostgreSQL `DESC` ordering: nulls first, then latest to earliest.
fn newest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> CmpOrdering {
    match (a, b) {
        (None, None) => CmpOrdering::Equal,
        (None, Some(_)) => CmpOrdering::Less,
        (Some(_), None) => CmpOrdering::Greater,
        (Some(a), Some(b)) => b.cmp(&a),
    }
}

#[async_trait]
impl AdminStore for InMemoryStore {
    async fn patients_for_practitioners(
        &self,
        ids: &PractitionerIds,
    ) -> AdminResult<Vec<PatientRow>> {
        self.enter()?;
        let mut rows: Vec<PatientRow> = self
            .patients
            .lock()
            .unwrap()
            .iter()
            .filter(|p| Self::owned_by(ids, &p.practitioner_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| newest_first(a.created_at, b.created_at));
        Ok(rows)
    }

    async fn diagnoses_for_practitioners(
        &self,
        ids: &PractitionerIds,
    ) -> AdminResult<Vec<DiagnosisRow>> {
        self.enter()?;
        let rows = self
            .diagnoses
            .lock()
            .unwrap()
            .iter()
            .filter(|d| Self::owned_by(ids, &d.practitioner_id))
            .cloned()
            .collect();
        Ok(Self::by_diagnosis_date(rows))
    }

    async fn diagnoses_for_patient(&self, patient_id: &str) -> AdminResult<Vec<DiagnosisRow>> {
        self.enter()?;
        let rows = self
            .diagnoses
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.patient_id.to_string() == patient_id)
            .cloned()
            .collect();
        Ok(Self::by_diagnosis_date(rows))
    }

    async fn diagnosis_by_id(&self, diagnosis_id: &str) -> AdminResult<Option<DiagnosisRow>> {
        self.enter()?;
        Ok(self
            .diagnoses
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.diagnosis_id.to_string() == diagnosis_id)
            .cloned())
    }

    async fn practitioner_stats(&self, ids: &PractitionerIds) -> AdminResult<StatsSnapshot> {
        self.enter()?;
        let distinct_patients = self
            .patients
            .lock()
            .unwrap()
            .iter()
            .filter(|p| Self::owned_by(ids, &p.practitioner_id))
            .map(|p| p.patient_id.to_string())
            .collect::<HashSet<_>>()
            .len() as i64;

        let diagnoses = self.diagnoses.lock().unwrap();
        let owned: Vec<&DiagnosisRow> = diagnoses
            .iter()
            .filter(|d| Self::owned_by(ids, &d.practitioner_id))
            .collect();

        let mut grouped: BTreeMap<Option<String>, i64> = BTreeMap::new();
        for d in &owned {
            *grouped.entry(d.status.clone()).or_default() += 1;
        }

        Ok(StatsSnapshot {
            distinct_patients,
            total_diagnoses: owned.len() as i64,
            status_rows: grouped
                .into_iter()
                .map(|(status, count)| StatusCountRow { status, count })
                .collect(),
        })
    }

    async fn practitioner_exists(&self, practitioner_id: &str) -> AdminResult<bool> {
        self.enter()?;
        let in_patients = self
            .patients
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.practitioner_id.to_string() == practitioner_id);
        let in_diagnoses = self
            .diagnoses
            .lock()
            .unwrap()
            .iter()
            .any(|d| d.practitioner_id.to_string() == practitioner_id);
        Ok(in_patients || in_diagnoses)
    }

    async fn ping(&self) -> AdminResult<()> {
        self.enter()
    }
}
