//! Admin endpoint handlers.
//!
//! Each handler extracts its input, calls [`AdminService`](admin_core::AdminService), and maps
//! failures through [`ApiError`]. Malformed JSON bodies are rejected by the `Json` extractor
//! before a handler runs.

use crate::error::ApiError;
use crate::AppState;
use admin_core::PractitionerIds;
use api_shared::{
    BannerRes, DiagnosisRecord, ErrorRes, HealthRes, HealthService, PatientRecord,
    PractitionerIdsReq, PractitionerStatsRes, ValidatePractitionerRes,
};
use axum::{
    extract::{Path, State},
    response::Json,
};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = BannerRes)
    )
)]
/// Service banner.
#[axum::debug_handler]
pub async fn root() -> Json<BannerRes> {
    Json(BannerRes {
        message: "HealthNaviAdmin Backend".into(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Reports whether the database answers a trivial query. Always responds 200 so load balancers
/// can read the body; `ok` carries the result.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    let database_ok = state.admin_service.database_reachable().await;
    Json(HealthService::check_health(database_ok))
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = PractitionerIdsReq,
    responses(
        (status = 200, description = "Patients owned by the practitioners, newest first", body = [PatientRecord]),
        (status = 500, description = "Data access failure", body = ErrorRes)
    )
)]
/// List patients for a set of practitioners
///
/// An empty `practitioner_ids` list returns an empty array without querying the database.
///
/// # Errors
/// Returns `500 Internal Server Error` if the query fails.
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
    Json(req): Json<PractitionerIdsReq>,
) -> Result<Json<Vec<PatientRecord>>, ApiError> {
    let ids = PractitionerIds::new(req.practitioner_ids);
    state
        .admin_service
        .patients(&ids)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_admin("Error fetching patients", e))
}

#[utoipa::path(
    post,
    path = "/api/diagnoses",
    request_body = PractitionerIdsReq,
    responses(
        (status = 200, description = "Diagnoses owned by the practitioners, most recent first", body = [DiagnosisRecord]),
        (status = 500, description = "Data access failure", body = ErrorRes)
    )
)]
/// List diagnoses for a set of practitioners
///
/// Chat history is decoded into an array; unreadable history is returned as `[]`.
///
/// # Errors
/// Returns `500 Internal Server Error` if the query fails.
#[axum::debug_handler]
pub async fn list_diagnoses(
    State(state): State<AppState>,
    Json(req): Json<PractitionerIdsReq>,
) -> Result<Json<Vec<DiagnosisRecord>>, ApiError> {
    let ids = PractitionerIds::new(req.practitioner_ids);
    state
        .admin_service
        .diagnoses(&ids)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_admin("Error fetching diagnoses", e))
}

#[utoipa::path(
    get,
    path = "/api/diagnoses/patient/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "Patient identifier")
    ),
    responses(
        (status = 200, description = "Diagnoses for the patient (possibly none)", body = [DiagnosisRecord]),
        (status = 500, description = "Data access failure", body = ErrorRes)
    )
)]
/// List diagnoses for one patient
///
/// An unknown patient and a patient without diagnoses both return an empty array.
#[axum::debug_handler]
pub async fn list_patient_diagnoses(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<DiagnosisRecord>>, ApiError> {
    state
        .admin_service
        .patient_diagnoses(&patient_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_admin("Error fetching patient diagnoses", e))
}

#[utoipa::path(
    get,
    path = "/api/diagnoses/{diagnosis_id}",
    params(
        ("diagnosis_id" = String, Path, description = "Diagnosis identifier")
    ),
    responses(
        (status = 200, description = "The diagnosis", body = DiagnosisRecord),
        (status = 404, description = "No diagnosis with this identifier", body = ErrorRes),
        (status = 500, description = "Data access failure", body = ErrorRes)
    )
)]
/// Read a single diagnosis
///
/// # Errors
/// Returns `404 Not Found` if the diagnosis does not exist, or `500 Internal Server Error` if
/// the query fails.
#[axum::debug_handler]
pub async fn read_diagnosis(
    State(state): State<AppState>,
    Path(diagnosis_id): Path<String>,
) -> Result<Json<DiagnosisRecord>, ApiError> {
    state
        .admin_service
        .diagnosis(&diagnosis_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_admin("Error fetching diagnosis", e))
}

#[utoipa::path(
    post,
    path = "/api/stats",
    request_body = PractitionerIdsReq,
    responses(
        (status = 200, description = "Aggregate figures for the practitioners", body = PractitionerStatsRes),
        (status = 500, description = "Data access failure", body = ErrorRes)
    )
)]
/// Aggregate statistics for a set of practitioners
///
/// `total_practitioners` counts the distinct identifiers supplied, not practitioners known to
/// the database. An empty list returns all zeros without querying.
///
/// # Errors
/// Returns `500 Internal Server Error` if any of the aggregate queries fails.
#[axum::debug_handler]
pub async fn practitioner_stats(
    State(state): State<AppState>,
    Json(req): Json<PractitionerIdsReq>,
) -> Result<Json<PractitionerStatsRes>, ApiError> {
    let ids = PractitionerIds::new(req.practitioner_ids);
    state
        .admin_service
        .stats(&ids)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_admin("Error fetching statistics", e))
}

#[utoipa::path(
    get,
    path = "/api/practitioner/validate/{practitioner_id}",
    params(
        ("practitioner_id" = String, Path, description = "Practitioner identifier")
    ),
    responses(
        (status = 200, description = "Whether the practitioner owns any patient or diagnosis", body = ValidatePractitionerRes),
        (status = 500, description = "Data access failure", body = ErrorRes)
    )
)]
/// Check whether a practitioner identifier is in use
///
/// True when the identifier owns at least one patient or at least one diagnosis. This is not
/// an identity check.
#[axum::debug_handler]
pub async fn validate_practitioner(
    State(state): State<AppState>,
    Path(practitioner_id): Path<String>,
) -> Result<Json<ValidatePractitionerRes>, ApiError> {
    state
        .admin_service
        .validate_practitioner(&practitioner_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_admin("Error validating practitioner", e))
}
