//! Home dashboard: greeting, pregnancy progress, metrics and daily tasks.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::models::{HealthMetric, MetricStatus, Task, TaskType};

/// Full-term pregnancy length used for "weeks to go".
pub const FULL_TERM_WEEKS: u32 = 40;

#[derive(Debug, thiserror::Error)]
pub enum HomeError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PregnancyProgress {
    pub current_week: u32,
    pub weeks_to_go: u32,
    pub trimester: u8,
    pub baby_size: String,
}

impl PregnancyProgress {
    pub fn at_week(current_week: u32, baby_size: impl Into<String>) -> Self {
        Self {
            current_week,
            weeks_to_go: FULL_TERM_WEEKS.saturating_sub(current_week),
            trimester: trimester_for_week(current_week),
            baby_size: baby_size.into(),
        }
    }

    /// "Your baby is now the size of an eggplant!"
    pub fn size_line(&self) -> String {
        format!("Your baby is now the size of an {}!", self.baby_size.to_lowercase())
    }
}

pub fn trimester_for_week(week: u32) -> u8 {
    match week {
        0..=13 => 1,
        14..=27 => 2,
        _ => 3,
    }
}

/// Greeting for a local hour (0-23).
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 17 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

pub fn greeting_now() -> &'static str {
    greeting_for_hour(chrono::Local::now().hour())
}

pub fn health_metrics() -> Vec<HealthMetric> {
    [
        ("1", "Blood Pressure", "120", "/80 mmHg"),
        ("2", "Weight Gain", "+12", "kg"),
        ("3", "Baby Heart Rate", "150", "bpm"),
    ]
    .into_iter()
    .map(|(id, title, value, unit)| HealthMetric {
        id: id.into(),
        title: title.into(),
        value: value.into(),
        unit: unit.into(),
        status: MetricStatus::Good,
    })
    .collect()
}

pub fn default_tasks() -> Vec<Task> {
    [
        ("1", "Take prenatal vitamins", "9:00 AM", true, TaskType::Medication),
        ("2", "Doctor appointment", "2:00 PM", false, TaskType::Appointment),
        ("3", "Drink water (8 glasses)", "Throughout day", false, TaskType::Hydration),
        ("4", "Light exercise", "5:00 PM", false, TaskType::Exercise),
    ]
    .into_iter()
    .map(|(id, title, time, completed, task_type)| Task {
        id: id.into(),
        title: title.into(),
        time: time.into(),
        completed,
        task_type,
    })
    .collect()
}

/// Mutable dashboard state owned by one user session.
#[derive(Debug, Clone)]
pub struct Dashboard {
    progress: PregnancyProgress,
    tasks: Vec<Task>,
}

/// What the home screen renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeView {
    pub greeting: String,
    pub progress: PregnancyProgress,
    pub metrics: Vec<HealthMetric>,
    pub tasks: Vec<Task>,
    pub completed_tasks: usize,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            progress: PregnancyProgress::at_week(28, "Eggplant"),
            tasks: default_tasks(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Flip a task's completion and return its new state.
    pub fn toggle_task(&mut self, task_id: &str) -> Result<Task, HomeError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| HomeError::TaskNotFound(task_id.to_string()))?;
        task.completed = !task.completed;
        tracing::debug!(task_id, completed = task.completed, "Task toggled");
        Ok(task.clone())
    }

    pub fn view(&self, greeting: &str) -> HomeView {
        HomeView {
            greeting: greeting.to_string(),
            progress: self.progress.clone(),
            metrics: health_metrics(),
            tasks: self.tasks.clone(),
            completed_tasks: self.completed_count(),
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_boundaries() {
        assert_eq!(greeting_for_hour(0), "Good Morning");
        assert_eq!(greeting_for_hour(11), "Good Morning");
        assert_eq!(greeting_for_hour(12), "Good Afternoon");
        assert_eq!(greeting_for_hour(16), "Good Afternoon");
        assert_eq!(greeting_for_hour(17), "Good Evening");
        assert_eq!(greeting_for_hour(23), "Good Evening");
    }

    #[test]
    fn week_28_is_third_trimester() {
        let p = PregnancyProgress::at_week(28, "Eggplant");
        assert_eq!(p.weeks_to_go, 12);
        assert_eq!(p.trimester, 3);
        assert_eq!(p.size_line(), "Your baby is now the size of an eggplant!");
    }

    #[test]
    fn trimester_ranges() {
        assert_eq!(trimester_for_week(13), 1);
        assert_eq!(trimester_for_week(14), 2);
        assert_eq!(trimester_for_week(27), 2);
        assert_eq!(trimester_for_week(41), 3);
        assert_eq!(PregnancyProgress::at_week(42, "Watermelon").weeks_to_go, 0);
    }

    #[test]
    fn toggle_flips_completion() {
        let mut dash = Dashboard::new();
        assert_eq!(dash.completed_count(), 1);
        assert!(dash.toggle_task("2").unwrap().completed);
        assert_eq!(dash.completed_count(), 2);
        assert!(!dash.toggle_task("2").unwrap().completed);
        assert_eq!(dash.completed_count(), 1);
    }

    #[test]
    fn toggle_unknown_task() {
        let mut dash = Dashboard::new();
        assert!(matches!(dash.toggle_task("9"), Err(HomeError::TaskNotFound(_))));
    }

    #[test]
    fn view_includes_metrics() {
        let view = Dashboard::new().view("Good Morning");
        assert_eq!(view.metrics.len(), 3);
        assert_eq!(view.tasks.len(), 4);
        assert_eq!(view.completed_tasks, 1);
        assert!(view.metrics.iter().all(|m| m.status == MetricStatus::Good));
    }
}
