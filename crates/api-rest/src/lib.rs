//! # API REST
//!
//! REST API for the clinic admin backend.
//!
//! Handles:
//! - HTTP endpoints with axum, all admin routes under `/api`
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON extraction, error envelopes, CORS)
//!
//! Uses `admin-core` for all data operations and `api-shared` for wire types.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use admin_core::AdminService;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared across REST API handlers.
///
/// Holds the service built once at startup around the shared connection pool.
#[derive(Clone)]
pub struct AppState {
    pub admin_service: AdminService,
}

impl AppState {
    pub fn new(admin_service: AdminService) -> Self {
        Self { admin_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::health,
        handlers::list_patients,
        handlers::list_diagnoses,
        handlers::list_patient_diagnoses,
        handlers::read_diagnosis,
        handlers::practitioner_stats,
        handlers::validate_practitioner,
    ),
    components(schemas(
        api_shared::BannerRes,
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::PractitionerIdsReq,
        api_shared::PatientRecord,
        api_shared::DiagnosisRecord,
        api_shared::StatusCounts,
        api_shared::PractitionerStatsRes,
        api_shared::ValidatePractitionerRes,
    ))
)]
pub struct ApiDoc;

/// Routes served under the `/api` prefix.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/patients", post(handlers::list_patients))
        .route("/diagnoses", post(handlers::list_diagnoses))
        .route(
            "/diagnoses/patient/:patient_id",
            get(handlers::list_patient_diagnoses),
        )
        .route("/diagnoses/:diagnosis_id", get(handlers::read_diagnosis))
        .route("/stats", post(handlers::practitioner_stats))
        .route(
            "/practitioner/validate/:practitioner_id",
            get(handlers::validate_practitioner),
        )
}

/// Build the complete application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest("/api", admin_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_core::testing::InMemoryStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(store: &Arc<InMemoryStore>) -> Router {
        router(AppState::new(AdminService::new(store.clone())))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_empty_practitioner_sets_skip_the_store() {
        let store = Arc::new(InMemoryStore::seeded());
        let empty = json!({"practitioner_ids": []});

        let (status, body) = send(app(&store), post_json("/api/patients", empty.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = send(app(&store), post_json("/api/diagnoses", empty.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = send(app(&store), post_json("/api/stats", empty)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "total_patients": 0,
                "total_diagnoses": 0,
                "status_counts": {"in_progress": 0, "paused": 0, "complete": 0, "critical": 0},
                "total_practitioners": 0
            })
        );

        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_end_to_end_diagnoses_and_stats() {
        let store = Arc::new(InMemoryStore::seeded());
        let ids = json!({"practitioner_ids": ["pr1"]});

        let (status, body) = send(app(&store), post_json("/api/diagnoses", ids.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["diagnosis_id"], json!("d1"));
        assert_eq!(records[0]["chat_history"], json!([{"role": "user"}]));

        let (status, body) = send(app(&store), post_json("/api/stats", ids)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "total_patients": 1,
                "total_diagnoses": 1,
                "status_counts": {"in_progress": 0, "paused": 0, "complete": 1, "critical": 0},
                "total_practitioners": 1
            })
        );
    }

    #[tokio::test]
    async fn test_patients_are_returned_for_practitioners() {
        let store = Arc::new(InMemoryStore::seeded());
        let (status, body) = send(
            app(&store),
            post_json("/api/patients", json!({"practitioner_ids": ["pr1"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["patient_id"], json!("p1"));
        assert_eq!(body[0]["practitioner_id"], json!("pr1"));
    }

    #[tokio::test]
    async fn test_stats_counts_distinct_input_practitioners() {
        let store = Arc::new(InMemoryStore::default());
        let (status, body) = send(
            app(&store),
            post_json("/api/stats", json!({"practitioner_ids": ["a", "a", "b"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_practitioners"], json!(2));
        assert_eq!(body["total_patients"], json!(0));
    }

    #[tokio::test]
    async fn test_stats_keeps_exactly_four_status_keys() {
        let store = Arc::new(InMemoryStore::seeded());
        store.push_diagnosis("d2", "p1", "pr1", None, Some("archived"));

        let (_, body) = send(
            app(&store),
            post_json("/api/stats", json!({"practitioner_ids": ["pr1"]})),
        )
        .await;
        let counts = body["status_counts"].as_object().unwrap();
        assert_eq!(counts.len(), 4);
        assert!(!counts.contains_key("archived"));
        assert_eq!(body["status_counts"]["complete"], json!(1));
    }

    #[tokio::test]
    async fn test_read_diagnosis_found_and_missing() {
        let store = Arc::new(InMemoryStore::seeded());

        let (status, body) = send(app(&store), get("/api/diagnoses/d1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["diagnosis_id"], json!("d1"));
        assert!(body["chat_history"].is_array());

        let (status, body) = send(app(&store), get("/api/diagnoses/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Diagnosis not found"}));
    }

    #[tokio::test]
    async fn test_patient_diagnoses_route() {
        let store = Arc::new(InMemoryStore::seeded());

        let (status, body) = send(app(&store), get("/api/diagnoses/patient/p1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = send(app(&store), get("/api/diagnoses/patient/unknown")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_malformed_chat_history_is_not_a_server_error() {
        let store = Arc::new(InMemoryStore::default());
        store.push_diagnosis("d7", "p7", "pr7", Some("{not json"), Some("paused"));

        let (status, body) = send(app(&store), get("/api/diagnoses/d7")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chat_history"], json!([]));
    }

    #[tokio::test]
    async fn test_validate_practitioner() {
        let store = Arc::new(InMemoryStore::seeded());
        store.push_diagnosis("d8", "p8", "only-diagnoses", None, None);

        let (_, body) = send(app(&store), get("/api/practitioner/validate/pr1")).await;
        assert_eq!(body, json!({"exists": true}));

        let (_, body) = send(app(&store), get("/api/practitioner/validate/only-diagnoses")).await;
        assert_eq!(body, json!({"exists": true}));

        let (status, body) = send(app(&store), get("/api/practitioner/validate/ghost")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"exists": false}));
    }

    #[tokio::test]
    async fn test_data_access_failure_is_500_with_detail() {
        let store = Arc::new(InMemoryStore::seeded());
        store.fail_next_calls();

        let (status, body) = send(
            app(&store),
            post_json("/api/diagnoses", json!({"practitioner_ids": ["pr1"]})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error fetching diagnoses: "));
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_before_the_handler() {
        let store = Arc::new(InMemoryStore::seeded());
        let (status, _) = send(
            app(&store),
            post_json("/api/patients", json!({"practitioner_ids": "pr1"})),
        )
        .await;
        assert!(status.is_client_error());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let store = Arc::new(InMemoryStore::default());

        let (status, body) = send(app(&store), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "HealthNaviAdmin Backend"}));

        let (status, body) = send(app(&store), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], json!(true));

        store.fail_next_calls();
        let (_, body) = send(app(&store), get("/health")).await;
        assert_eq!(body["ok"], json!(false));
    }
}
