//! Remediation action DTOs for both sides of the bowtie.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::{lenient, ActionPriority, ActionStatus};

/// Preventive action attached to a cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreventionActionDto {
    pub id: i64,
    pub description: Option<String>,
    #[serde(default)]
    pub cost: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub priority: Option<ActionPriority>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<ActionStatus>,
    pub assigned_to: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_date")]
    pub due_date: Option<NaiveDate>,
}

/// Mitigation action attached to a consequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MitigationActionDto {
    pub id: i64,
    #[serde(default)]
    pub consequence_id: i64,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub priority: Option<ActionPriority>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<ActionStatus>,
    #[serde(default)]
    pub estimated_cost: f64,
    pub assigned_to: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_date")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePreventionActionDto {
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub cost: f64,
    pub priority: ActionPriority,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<ActionStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMitigationActionDto {
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub estimated_cost: f64,
    pub priority: ActionPriority,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<ActionStatus>,
}

/// PUT payload for a preventive action.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreventionActionDto {
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub cost: f64,
    pub priority: ActionPriority,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<ActionStatus>,
}

/// PUT payload for a mitigation action.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMitigationActionDto {
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub estimated_cost: f64,
    pub priority: ActionPriority,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<ActionStatus>,
}
