//! Configuration for the grievance service.

use serde::{Deserialize, Serialize};

/// Configuration for a [`GrievanceService`](crate::service::GrievanceService).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service instance ID, used in log fields
    pub service_id: String,
    /// How many records a dashboard summary lists as recent
    pub recent_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_id: uuid::Uuid::new_v4().to_string(),
            recent_limit: 5,
        }
    }
}

impl ServiceConfig {
    /// Create a config with a fixed service ID.
    pub fn new(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            ..Default::default()
        }
    }

    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
