use serde::{Deserialize, Serialize};

use super::enums::{MetricStatus, TaskType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetric {
    pub id: String,
    pub title: String,
    pub value: String,
    pub unit: String,
    pub status: MetricStatus,
}

/// A daily checklist item on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub time: String,
    pub completed: bool,
    #[serde(rename = "type")]
    pub task_type: TaskType,
}
