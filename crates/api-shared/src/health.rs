use crate::{now_timestamp, HealthRes, RootRes, SERVICE_NAME, SERVICE_VERSION};

/// Health and banner responses for the T-Flow API.
pub struct HealthService;

impl HealthService {
    /// Reports the service as healthy, stamped with the current time.
    ///
    /// The check is a liveness probe only; it does not contact the provider or the store.
    pub fn check_health() -> HealthRes {
        HealthRes {
            status: "healthy".into(),
            service: SERVICE_NAME.into(),
            version: SERVICE_VERSION.into(),
            timestamp: now_timestamp(),
        }
    }

    /// Service banner with pointers to the docs and health endpoints.
    pub fn banner() -> RootRes {
        RootRes {
            message: SERVICE_NAME.into(),
            version: SERVICE_VERSION.into(),
            docs: "/docs".into(),
            health: "/api/health".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_is_healthy_and_timestamped() {
        let res = HealthService::check_health();
        assert_eq!(res.status, "healthy");
        assert_eq!(res.service, SERVICE_NAME);
        assert!(chrono::DateTime::parse_from_rfc3339(&res.timestamp).is_ok());
    }

    #[test]
    fn banner_points_at_docs_and_health() {
        let res = HealthService::banner();
        assert_eq!(res.docs, "/docs");
        assert_eq!(res.health, "/api/health");
    }
}
