//! Cause and consequence DTOs, the two halves of the bowtie.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::action::{
    CreateMitigationActionDto, CreatePreventionActionDto, MitigationActionDto,
    PreventionActionDto,
};
use super::enums::{lenient, Likelihood, Severity};

/// A cause feeding the risk event, with its preventive actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CauseDto {
    pub id: i64,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub likelihood: Option<Likelihood>,
    #[serde(default, deserialize_with = "lenient")]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub prevention_actions: Vec<PreventionActionDto>,
}

/// A consequence of the risk event, with its mitigation actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsequenceDto {
    pub id: i64,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub potential_cost: f64,
    #[serde(default)]
    pub mitigation_actions: Vec<MitigationActionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCauseDto {
    #[validate(length(min = 1))]
    pub description: String,
    pub likelihood: Likelihood,
    pub severity: Severity,
    #[validate(nested)]
    #[serde(default)]
    pub prevention_actions: Vec<CreatePreventionActionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsequenceDto {
    #[validate(length(min = 1))]
    pub description: String,
    pub severity: Severity,
    #[validate(range(min = 0.0))]
    pub potential_cost: f64,
    #[validate(nested)]
    #[serde(default)]
    pub mitigation_actions: Vec<CreateMitigationActionDto>,
}

/// PUT payload for a cause.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCauseDto {
    #[validate(length(min = 1))]
    pub description: String,
    pub likelihood: Likelihood,
    pub severity: Severity,
}

/// PUT payload for a consequence.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConsequenceDto {
    #[validate(length(min = 1))]
    pub description: String,
    pub severity: Severity,
    #[validate(range(min = 0.0))]
    pub potential_cost: f64,
}
