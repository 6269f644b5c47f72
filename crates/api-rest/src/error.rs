//! Translation of core errors into HTTP responses.
//!
//! This is the only place error kinds become status codes.

use admin_core::AdminError;
use api_shared::ErrorRes;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

/// A `{detail}` error response with its status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Map a core error raised while `context` (for example "Error fetching patients").
    ///
    /// Data-access failures are logged and carry their cause in the detail. This API is internal;
    /// the cause is not redacted.
    pub fn from_admin(context: &str, err: AdminError) -> Self {
        match err {
            AdminError::NotFound(what) => {
                Self::new(StatusCode::NOT_FOUND, format!("{what} not found"))
            }
            AdminError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            AdminError::DataAccess(e) => {
                tracing::error!("{}: {:?}", context, e);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("{context}: {e}"))
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorRes { detail: self.detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_core::error::DataAccessCause;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from_admin(
            "Error fetching diagnosis",
            AdminError::NotFound("Diagnosis".into()),
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.detail(), "Diagnosis not found");
    }

    #[test]
    fn test_data_access_maps_to_500_with_cause() {
        let err = ApiError::from_admin(
            "Error fetching patients",
            AdminError::DataAccess(DataAccessCause::PoolTimedOut),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.detail().starts_with("Error fetching patients: "));
        assert!(err.detail().len() > "Error fetching patients: ".len());
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = ApiError::from_admin("ctx", AdminError::Validation("bad id".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), "bad id");
    }
}
