//! Constants used throughout the admin core crate.

/// Diagnosis status: assessment still under way.
pub const STATUS_IN_PROGRESS: &str = "in_progress";

/// Diagnosis status: assessment put on hold.
pub const STATUS_PAUSED: &str = "paused";

/// Diagnosis status: assessment finished.
pub const STATUS_COMPLETE: &str = "complete";

/// Diagnosis status: flagged for urgent attention.
pub const STATUS_CRITICAL: &str = "critical";

/// The closed set of statuses reported in aggregate counts.
pub const STATUS_BUCKETS: [&str; 4] = [
    STATUS_IN_PROGRESS,
    STATUS_PAUSED,
    STATUS_COMPLETE,
    STATUS_CRITICAL,
];

/// Value of `ADMIN_ENV` that relaxes required database settings.
pub const DEVELOPMENT_ENV: &str = "development";

/// Default REST bind address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:8083";

/// Default PostgreSQL port used in development mode.
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 0;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;
