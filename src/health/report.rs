//! Aggregate health report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Overall status across all backend services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateStatus {
    Healthy,
    Degraded,
}

/// Reachability of every registered service, built fresh per probe.
///
/// Serializes as `{ "status": "healthy"|"degraded", "services": { name: bool } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    status: AggregateStatus,
    services: BTreeMap<String, bool>,
}

impl HealthReport {
    /// Build a report; the aggregate is derived, never supplied.
    pub fn from_results(results: impl IntoIterator<Item = (String, bool)>) -> Self {
        let services: BTreeMap<String, bool> = results.into_iter().collect();
        let status = if services.values().all(|&up| up) {
            AggregateStatus::Healthy
        } else {
            AggregateStatus::Degraded
        };
        Self { status, services }
    }

    pub fn status(&self) -> AggregateStatus {
        self.status
    }

    pub fn is_healthy(&self) -> bool {
        self.status == AggregateStatus::Healthy
    }

    /// Per-service reachability.
    pub fn services(&self) -> &BTreeMap<String, bool> {
        &self.services
    }

    pub fn is_reachable(&self, service: &str) -> Option<bool> {
        self.services.get(service).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_up_is_healthy() {
        let report = HealthReport::from_results([("curator".to_string(), true), ("public".to_string(), true)]);
        assert_eq!(report.status(), AggregateStatus::Healthy);
    }

    #[test]
    fn test_one_down_is_degraded() {
        let report = HealthReport::from_results([
            ("curator".to_string(), true),
            ("monetizer".to_string(), false),
        ]);
        assert_eq!(report.status(), AggregateStatus::Degraded);
        assert_eq!(report.is_reachable("curator"), Some(true));
        assert_eq!(report.is_reachable("monetizer"), Some(false));
        assert_eq!(report.is_reachable("gateway"), None);
    }

    #[test]
    fn test_empty_is_healthy() {
        let report = HealthReport::from_results(Vec::new());
        assert!(report.is_healthy());
        assert!(report.services().is_empty());
    }

    #[test]
    fn test_wire_format() {
        let report = HealthReport::from_results([
            ("monetizer".to_string(), false),
            ("curator".to_string(), true),
        ]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "degraded",
                "services": { "curator": true, "monetizer": false }
            })
        );
    }
}
