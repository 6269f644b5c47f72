//! # API Shared
//!
//! Shared wire definitions for the clinic admin API.
//!
//! Contains:
//! - Request and response bodies (`dto` module)
//! - The `{detail}` error envelope
//! - Shared services like `HealthService`
//!
//! Used by `admin-core` to shape records and by `api-rest` to serve them.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
