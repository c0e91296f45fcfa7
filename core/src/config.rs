//! Dispatch policy configuration.
//!
//! Every threshold the routing logic consults lives here, not inline in the
//! components. Defaults match the production policy; deployments override
//! them with a JSON file loaded at startup.

use crate::item::Priority;
use serde::{Deserialize, Serialize};

/// Top-level configuration for the work-distribution core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub sla: SlaConfig,
    #[serde(default)]
    pub capacity: CapacityThresholds,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub rebalance: RebalanceConfig,
}

/// Hour offsets per priority for one deadline kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityHours {
    pub low: i64,
    pub medium: i64,
    pub high: i64,
    pub critical: i64,
}

impl PriorityHours {
    pub fn for_priority(&self, priority: Priority) -> i64 {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
            Priority::Critical => self.critical,
        }
    }
}

/// SLA deadline tables. Three independent tables, all keyed by priority;
/// more urgent priorities map to smaller hour values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaConfig {
    pub response_hours: PriorityHours,
    pub escalation_hours: PriorityHours,
    pub review_hours: PriorityHours,
    /// Remaining time below this window flips an open item to at-risk.
    pub at_risk_window_hours: i64,
}

impl Default for SlaConfig {
    fn default() -> Self {
        Self {
            response_hours: PriorityHours {
                low: 72,
                medium: 24,
                high: 4,
                critical: 1,
            },
            escalation_hours: PriorityHours {
                low: 120,
                medium: 48,
                high: 8,
                critical: 2,
            },
            review_hours: PriorityHours {
                low: 24,
                medium: 12,
                high: 4,
                critical: 1,
            },
            at_risk_window_hours: 24,
        }
    }
}

/// Workload-percentage thresholds for the capacity model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityThresholds {
    /// At or above this percentage a staff member counts as busy.
    pub busy_pct: u32,
    /// At or above this percentage a staff member counts as overloaded
    /// and stops receiving auto-assignments.
    pub overloaded_pct: u32,
    /// Below this percentage a staff member is a rebalance target.
    pub underloaded_pct: u32,
}

impl Default for CapacityThresholds {
    fn default() -> Self {
        Self {
            busy_pct: 70,
            overloaded_pct: 90,
            underloaded_pct: 50,
        }
    }
}

/// Component weights for the candidate score. Must sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub distance: f64,
    pub workload: f64,
    pub performance: f64,
    pub specialization: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    /// Hard ceiling on straight-line distance between item and staff.
    pub max_distance_km: f64,
    /// Staff below this performance score are never auto-assigned.
    pub min_performance_score: f64,
    /// Specialization credit for same-department staff without the
    /// item's category.
    pub department_partial_credit: f64,
    /// Distance component used when either location is missing.
    pub unknown_distance_credit: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights {
                distance: 0.15,
                workload: 0.35,
                performance: 0.30,
                specialization: 0.20,
            },
            max_distance_km: 50.0,
            min_performance_score: 40.0,
            department_partial_credit: 0.3,
            unknown_distance_credit: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebalanceConfig {
    /// Maximum assignments moved away from one overloaded staff member
    /// per invocation.
    pub max_moves_per_source: usize,
}

impl Default for RebalanceConfig {
    fn default() -> Self {
        Self {
            max_moves_per_source: 2,
        }
    }
}

impl DispatchConfig {
    /// Load configuration from a JSON file. Missing sections fall back
    /// to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read dispatch config {path}: {e}"))?;
        let config: DispatchConfig = serde_json::from_str(&content)?;
        config.validate();
        Ok(config)
    }

    /// Panics on internally inconsistent configuration. A malformed policy
    /// file is a deployment error, not a runtime condition.
    pub fn validate(&self) {
        for (name, table) in [
            ("response_hours", &self.sla.response_hours),
            ("escalation_hours", &self.sla.escalation_hours),
            ("review_hours", &self.sla.review_hours),
        ] {
            for priority in Priority::ALL {
                assert!(
                    table.for_priority(priority) >= 1,
                    "sla.{name} must be >= 1 hour for {priority:?}"
                );
            }
        }
        assert!(
            self.sla.at_risk_window_hours >= 0,
            "sla.at_risk_window_hours must not be negative"
        );

        let w = &self.scoring.weights;
        let sum = w.distance + w.workload + w.performance + w.specialization;
        assert!(
            (sum - 1.0).abs() < 1e-6,
            "scoring.weights must sum to 1.0, got {sum}"
        );
        assert!(
            self.scoring.max_distance_km > 0.0,
            "scoring.max_distance_km must be positive"
        );

        assert!(
            self.capacity.busy_pct <= self.capacity.overloaded_pct,
            "capacity.busy_pct must not exceed capacity.overloaded_pct"
        );
        assert!(
            self.capacity.underloaded_pct <= self.capacity.busy_pct,
            "capacity.underloaded_pct must not exceed capacity.busy_pct"
        );
    }
}
