//! # Admin Core
//!
//! Core read logic for the clinic admin API.
//!
//! This crate contains the data operations behind every endpoint:
//! - Parameterised read-only queries against the `patients` and `diagnoses` tables (`store`)
//! - Row normalisation into response records (`normalise`)
//! - Aggregate statistics with fixed status buckets (`stats`)
//! - Startup configuration for the database and its connection pool (`config`)
//!
//! **No API concerns**: routing, status codes and JSON extraction belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod normalise;
pub mod rows;
pub mod service;
pub mod stats;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::{DatabaseConfig, PoolSettings, RunMode};
pub use error::{AdminError, AdminResult};
pub use ids::PractitionerIds;
pub use service::AdminService;
pub use store::{postgres::connect_pool, AdminStore, PgAdminStore};
