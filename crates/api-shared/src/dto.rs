//! Request and response bodies exchanged over the admin API.
//!
//! Every identifier is serialised as a string, whatever the underlying column type. Optional
//! columns serialise as `null` rather than being omitted so the response schema stays stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Body of every endpoint that takes a set of practitioners.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PractitionerIdsReq {
    pub practitioner_ids: Vec<String>,
}

/// A patient as returned by `POST /patients`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientRecord {
    pub patient_id: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub practitioner_id: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// A diagnosis with its chat history decoded into a JSON array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiagnosisRecord {
    pub diagnosis_id: String,
    pub patient_id: String,
    pub practitioner_id: String,
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
    /// Ordered chat messages. The message schema is owned by the clinical front end.
    #[schema(value_type = Vec<Object>)]
    pub chat_history: Vec<Value>,
    pub status: Option<String>,
    pub diagnosis_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Diagnosis counts for the four fixed status buckets.
///
/// All four keys are always present; statuses outside this set are never reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCounts {
    pub in_progress: i64,
    pub paused: i64,
    pub complete: i64,
    pub critical: i64,
}

/// Aggregate figures for a set of practitioners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PractitionerStatsRes {
    pub total_patients: i64,
    pub total_diagnoses: i64,
    pub status_counts: StatusCounts,
    /// Distinct identifiers in the request. This is not a count of known practitioners.
    pub total_practitioners: i64,
}

/// Result of `GET /practitioner/validate/{id}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidatePractitionerRes {
    pub exists: bool,
}

/// Error envelope returned with every non-2xx status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

/// Body of `GET /`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BannerRes {
    pub message: String,
}

/// Body of `GET /health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}
