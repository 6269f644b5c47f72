use crate::dto::HealthRes;

/// Builds health responses for the admin API.
///
/// The database check itself lives in `admin-core`; this type only turns its outcome into the
/// response body so the wording stays in one place.
#[derive(Clone, Copy, Debug)]
pub struct HealthService;

impl HealthService {
    /// Builds the health response for the given database reachability.
    ///
    /// # Arguments
    /// * `database_ok` - Whether the database answered a trivial query.
    ///
    /// # Returns
    /// A `HealthRes` with `ok` mirroring `database_ok`.
    pub fn check_health(database_ok: bool) -> HealthRes {
        if database_ok {
            HealthRes {
                ok: true,
                message: "Clinic admin API is alive".into(),
            }
        } else {
            HealthRes {
                ok: false,
                message: "Clinic admin API cannot reach the database".into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_health_reflects_database() {
        assert!(HealthService::check_health(true).ok);
        let down = HealthService::check_health(false);
        assert!(!down.ok);
        assert!(down.message.contains("database"));
    }
}
