//! Top-level risk DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::bowtie::{CauseDto, ConsequenceDto, CreateCauseDto, CreateConsequenceDto};
use super::enums::{lenient, Likelihood, RiskStatus, Severity};

/// A risk as returned by the backend, with its full bowtie.
///
/// `initial_risk_level` and `residual_risk_level` are the backend's stored
/// products. They are kept for wire fidelity but views always recompute the
/// score from the likelihood/severity factors, so a stale stored level can
/// never leak into the display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskDto {
    pub id: i64,
    pub risk_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<RiskStatus>,
    pub description: Option<String>,
    pub business_domain: Option<String>,
    pub risk_owner: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_date")]
    pub review_date: Option<NaiveDate>,
    #[serde(default)]
    pub trigger_events: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub initial_likelihood: Option<Likelihood>,
    #[serde(default, deserialize_with = "lenient")]
    pub initial_severity: Option<Severity>,
    #[serde(default)]
    pub initial_risk_level: i32,
    #[serde(default, deserialize_with = "lenient")]
    pub residual_likelihood: Option<Likelihood>,
    #[serde(default, deserialize_with = "lenient")]
    pub residual_severity: Option<Severity>,
    #[serde(default)]
    pub residual_risk_level: i32,
    #[serde(default)]
    pub causes: Vec<CauseDto>,
    #[serde(default)]
    pub consequences: Vec<ConsequenceDto>,
    #[serde(default)]
    pub requires_immediate_action: bool,
    #[serde(default)]
    pub requires_review: bool,
}

/// POST payload for a new risk with its initial bowtie.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRiskDto {
    #[validate(length(min = 1))]
    pub risk_id: String,
    pub status: RiskStatus,
    #[validate(length(min = 1))]
    pub description: String,
    pub business_domain: String,
    pub risk_owner: String,
    pub review_date: Option<NaiveDate>,
    #[serde(default)]
    pub trigger_events: Vec<String>,
    pub initial_likelihood: Likelihood,
    pub initial_severity: Severity,
    pub residual_likelihood: Likelihood,
    pub residual_severity: Severity,
    #[validate(nested)]
    #[serde(default)]
    pub causes: Vec<CreateCauseDto>,
    #[validate(nested)]
    #[serde(default)]
    pub consequences: Vec<CreateConsequenceDto>,
}

/// PUT payload for the risk header (bowtie parts update separately).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRiskDto {
    #[validate(length(min = 1))]
    pub description: String,
    pub status: RiskStatus,
    pub business_domain: Option<String>,
    pub risk_owner: Option<String>,
    pub review_date: Option<NaiveDate>,
    #[serde(default)]
    pub trigger_events: Vec<String>,
    pub initial_likelihood: Likelihood,
    pub initial_severity: Severity,
    pub residual_likelihood: Likelihood,
    pub residual_severity: Severity,
}
