//! Health checks for the running session.
//!
//! Readiness follows the session phase: a loaded show is healthy, a pending
//! load is degraded and a failed load is unhealthy.

use seatmap_core::session::{SessionPhase, SessionState};
use serde::Serialize;

/// Health check status levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Component is fully operational
    Healthy,

    /// Component is up but cannot serve yet
    Degraded,

    /// Component is not operational
    Unhealthy,
}

impl HealthStatus {
    /// Check if status is healthy
    #[must_use]
    pub const fn is_healthy(self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Get the worst status between two statuses
    #[must_use]
    pub const fn worst(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unhealthy, _) | (_, Self::Unhealthy) => Self::Unhealthy,
            (Self::Degraded, _) | (_, Self::Degraded) => Self::Degraded,
            _ => Self::Healthy,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Degraded => write!(f, "degraded"),
            Self::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Health check result for a component
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    /// Name of the component being checked
    pub component: String,

    /// Current health status
    pub status: HealthStatus,

    /// Optional message providing details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Extra facts (seat counts, source location)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<(String, String)>,
}

impl HealthCheck {
    /// Create a healthy check result
    #[must_use]
    pub fn healthy(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Healthy,
            message: None,
            metadata: Vec::new(),
        }
    }

    /// Create a degraded check result
    #[must_use]
    pub fn degraded(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Degraded,
            message: Some(message.into()),
            metadata: Vec::new(),
        }
    }

    /// Create an unhealthy check result
    #[must_use]
    pub fn unhealthy(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            metadata: Vec::new(),
        }
    }

    /// Add metadata to the health check
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }
}

/// Health of the show session
#[must_use]
pub fn session_health(state: &SessionState) -> HealthCheck {
    const COMPONENT: &str = "show";

    match &state.phase {
        SessionPhase::Idle => HealthCheck::degraded(COMPONENT, "show not requested yet"),
        SessionPhase::Loading => HealthCheck::degraded(COMPONENT, "show is loading"),
        SessionPhase::Failed(error) => HealthCheck::unhealthy(COMPONENT, error.to_string()),
        SessionPhase::Ready(session) => HealthCheck::healthy(COMPONENT)
            .with_metadata("title", session.show().movie.title.clone())
            .with_metadata("seats", session.show().seat_layout.seat_count().to_string())
            .with_metadata("selected", session.selection().len().to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use seatmap_core::error::LoadError;

    #[test]
    fn worst_prefers_unhealthy() {
        assert_eq!(HealthStatus::Healthy.worst(HealthStatus::Degraded), HealthStatus::Degraded);
        assert_eq!(HealthStatus::Degraded.worst(HealthStatus::Unhealthy), HealthStatus::Unhealthy);
        assert_eq!(HealthStatus::Healthy.worst(HealthStatus::Healthy), HealthStatus::Healthy);
    }

    #[test]
    fn idle_session_is_degraded() {
        let check = session_health(&SessionState::default());
        assert_eq!(check.status, HealthStatus::Degraded);
    }

    #[test]
    fn failed_session_is_unhealthy_with_reason() {
        let state = SessionState {
            phase: SessionPhase::Failed(LoadError::Malformed("eof".to_string())),
        };
        let check = session_health(&state);
        assert_eq!(check.status, HealthStatus::Unhealthy);
        assert!(check.message.unwrap().contains("eof"));
    }

    #[test]
    fn serializes_lowercase_status() {
        let json = serde_json::to_value(HealthCheck::healthy("show")).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json.get("message").is_none());
    }
}
