//! Action tracker aggregation across a set of risks.
//!
//! Flattens both sides of every bowtie into one worklist, layers overdue
//! state on top of the display status, and produces the summary counters
//! the tracker header shows. "Today" is always an argument so the
//! computation stays pure.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::enums::ActionType;
use crate::services::bowtie::{ActionView, RiskView};
use crate::services::scoring::{DisplayPriority, DisplayStatus};

/// Tracker display status. Overdue takes precedence over an Open or
/// In-Progress badge; Completed and Disabled are never overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackerStatus {
    Open,
    InProgress,
    Completed,
    Overdue,
    Disabled,
}

impl TrackerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::Disabled => "disabled",
        }
    }
}

/// One row of the tracker worklist.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerItem {
    pub action_id: i64,
    pub description: String,
    pub action_type: ActionType,
    pub risk_code: String,
    pub risk_description: String,
    pub assigned_to: String,
    pub due_date: Option<NaiveDate>,
    pub cost: f64,
    pub priority: DisplayPriority,
    pub status: TrackerStatus,
    pub days_overdue: i64,
}

/// Days past the due date, zero when not yet due or undated.
pub fn days_overdue(due_date: Option<NaiveDate>, today: NaiveDate) -> i64 {
    match due_date {
        Some(due) => (today - due).num_days().max(0),
        None => 0,
    }
}

/// Layer overdue state onto a display status.
pub fn effective_status(status: DisplayStatus, days_overdue: i64) -> TrackerStatus {
    match status {
        DisplayStatus::Completed => TrackerStatus::Completed,
        DisplayStatus::Disabled => TrackerStatus::Disabled,
        DisplayStatus::Open | DisplayStatus::InProgress if days_overdue > 0 => {
            TrackerStatus::Overdue
        }
        DisplayStatus::Open => TrackerStatus::Open,
        DisplayStatus::InProgress => TrackerStatus::InProgress,
    }
}

/// Flatten every action in the given risks into a sorted worklist:
/// priority weight descending, then due date ascending with undated last.
pub fn collect_items(views: &[RiskView], today: NaiveDate) -> Vec<TrackerItem> {
    let mut items = Vec::new();
    for view in views {
        for cause in &view.causes {
            for action in &cause.preventive_actions {
                items.push(item_from_view(view, action, ActionType::Preventive, today));
            }
        }
        for consequence in &view.consequences {
            for action in &consequence.mitigation_actions {
                items.push(item_from_view(view, action, ActionType::Mitigation, today));
            }
        }
    }
    items.sort_by(|a, b| {
        b.priority
            .sort_weight()
            .cmp(&a.priority.sort_weight())
            .then_with(|| match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });
    items
}

fn item_from_view(
    risk: &RiskView,
    action: &ActionView,
    action_type: ActionType,
    today: NaiveDate,
) -> TrackerItem {
    let overdue = days_overdue(action.due_date, today);
    TrackerItem {
        action_id: action.id,
        description: action.name.clone(),
        action_type,
        risk_code: risk.code.clone(),
        risk_description: risk.description.clone(),
        assigned_to: action.assigned_to.clone(),
        due_date: action.due_date,
        cost: action.cost,
        priority: action.priority,
        status: effective_status(action.status, overdue),
        days_overdue: overdue,
    }
}

/// Tracker tab buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerTab {
    All,
    Upcoming,
    Overdue,
    Completed,
}

/// Filter the worklist by tab. Upcoming means still actionable and not yet
/// overdue.
pub fn filter_items(items: &[TrackerItem], tab: TrackerTab) -> Vec<&TrackerItem> {
    items
        .iter()
        .filter(|item| match tab {
            TrackerTab::All => true,
            TrackerTab::Upcoming => {
                matches!(item.status, TrackerStatus::Open | TrackerStatus::InProgress)
            }
            TrackerTab::Overdue => item.status == TrackerStatus::Overdue,
            TrackerTab::Completed => item.status == TrackerStatus::Completed,
        })
        .collect()
}

/// Header counters for the tracker.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusSummary {
    pub open: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub overdue: u32,
    pub total: u32,
    pub completion_percentage: u32,
    pub progress_text: String,
}

impl StatusSummary {
    pub fn from_items(items: &[TrackerItem]) -> Self {
        let mut open = 0;
        let mut in_progress = 0;
        let mut completed = 0;
        let mut overdue = 0;
        for item in items {
            match item.status {
                TrackerStatus::Open => open += 1,
                TrackerStatus::InProgress => in_progress += 1,
                TrackerStatus::Completed => completed += 1,
                TrackerStatus::Overdue => overdue += 1,
                TrackerStatus::Disabled => {}
            }
        }
        let total = items.len() as u32;
        let completion_percentage = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };
        Self {
            open,
            in_progress,
            completed,
            overdue,
            total,
            completion_percentage,
            progress_text: format!("{completed} of {total} actions completed"),
        }
    }
}
