//! Bowtie view-model construction.
//!
//! Everything derived (scores, bands, priorities, colors) is recomputed
//! from the source ordinals on every build; stored backend level fields are
//! never trusted for display.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::ScoringConfig;
use crate::models::bowtie::{CauseDto, ConsequenceDto};
use crate::models::enums::{BackendOrdinal, Likelihood, Severity};
use crate::models::risk::RiskDto;
use crate::services::scoring::{
    classify_action_priority, classify_action_status, classify_risk, derive_priority,
    derive_priority_from_severity, risk_status_color, risk_status_label, DisplayPriority,
    DisplayStatus, RiskAssessment, RiskBand, RiskStatusColor,
};

pub const UNASSIGNED: &str = "Unassigned";

/// A remediation action ready for badge rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ActionView {
    pub id: i64,
    pub name: String,
    pub cost: f64,
    pub priority: DisplayPriority,
    pub status: DisplayStatus,
    pub assigned_to: String,
    pub due_date: Option<NaiveDate>,
}

/// A cause with its derived priority and preventive actions.
#[derive(Debug, Clone, Serialize)]
pub struct CauseView {
    pub id: i64,
    pub name: String,
    pub likelihood: Likelihood,
    pub priority: DisplayPriority,
    pub preventive_actions: Vec<ActionView>,
}

/// A consequence with its derived priority and mitigation actions.
#[derive(Debug, Clone, Serialize)]
pub struct ConsequenceView {
    pub id: i64,
    pub name: String,
    pub severity: Severity,
    pub cost: f64,
    pub priority: DisplayPriority,
    pub mitigation_actions: Vec<ActionView>,
}

/// A fully mapped risk: header, recomputed assessments, and bowtie tree.
#[derive(Debug, Clone, Serialize)]
pub struct RiskView {
    pub id: i64,
    pub code: String,
    pub description: String,
    /// Effective factors for matrix placement: residual when assessed,
    /// initial otherwise, midpoint when neither is present.
    pub likelihood: Likelihood,
    pub severity: Severity,
    pub initial: RiskAssessment,
    pub residual: RiskAssessment,
    pub status_label: String,
    pub status_color: RiskStatusColor,
    pub owner: String,
    pub business_domain: String,
    pub review_date: Option<NaiveDate>,
    pub trigger_events: Vec<String>,
    pub requires_immediate_action: bool,
    pub requires_review: bool,
    pub causes: Vec<CauseView>,
    pub consequences: Vec<ConsequenceView>,
}

impl RiskView {
    pub fn from_dto(dto: &RiskDto, config: &ScoringConfig) -> Self {
        let thresholds = &config.bands;
        let likelihood = dto
            .residual_likelihood
            .or(dto.initial_likelihood)
            .unwrap_or(Likelihood::DEFAULT);
        let severity = dto
            .residual_severity
            .or(dto.initial_severity)
            .unwrap_or(Severity::DEFAULT);

        Self {
            id: dto.id,
            code: dto.risk_id.clone().unwrap_or_default(),
            description: dto.description.clone().unwrap_or_default(),
            likelihood,
            severity,
            initial: classify_risk(dto.initial_likelihood, dto.initial_severity, thresholds),
            residual: classify_risk(dto.residual_likelihood, dto.residual_severity, thresholds),
            status_label: risk_status_label(dto.status),
            status_color: risk_status_color(dto.status),
            owner: dto.risk_owner.clone().unwrap_or_default(),
            business_domain: dto.business_domain.clone().unwrap_or_default(),
            review_date: dto.review_date,
            trigger_events: dto.trigger_events.clone(),
            requires_immediate_action: dto.requires_immediate_action,
            requires_review: dto.requires_review,
            causes: dto
                .causes
                .iter()
                .map(|cause| CauseView::from_dto(cause, config))
                .collect(),
            consequences: dto
                .consequences
                .iter()
                .map(ConsequenceView::from_dto)
                .collect(),
        }
    }
}

impl CauseView {
    pub fn from_dto(dto: &CauseDto, config: &ScoringConfig) -> Self {
        Self {
            id: dto.id,
            name: dto.description.clone().unwrap_or_default(),
            likelihood: dto.likelihood.unwrap_or(Likelihood::DEFAULT),
            priority: derive_priority(dto.likelihood, dto.severity, &config.bands),
            preventive_actions: dto
                .prevention_actions
                .iter()
                .map(|action| ActionView {
                    id: action.id,
                    name: action.description.clone().unwrap_or_default(),
                    cost: action.cost,
                    priority: classify_action_priority(action.priority),
                    status: classify_action_status(action.status),
                    assigned_to: assignee(&action.assigned_to),
                    due_date: action.due_date,
                })
                .collect(),
        }
    }
}

impl ConsequenceView {
    pub fn from_dto(dto: &ConsequenceDto) -> Self {
        Self {
            id: dto.id,
            name: dto.description.clone().unwrap_or_default(),
            severity: dto.severity.unwrap_or(Severity::DEFAULT),
            cost: dto.potential_cost,
            priority: derive_priority_from_severity(dto.severity),
            mitigation_actions: dto
                .mitigation_actions
                .iter()
                .map(|action| ActionView {
                    id: action.id,
                    name: action.description.clone().unwrap_or_default(),
                    cost: action.estimated_cost,
                    priority: classify_action_priority(action.priority),
                    status: classify_action_status(action.status),
                    assigned_to: assignee(&action.assigned_to),
                    due_date: action.due_date,
                })
                .collect(),
        }
    }
}

fn assignee(raw: &Option<String>) -> String {
    match raw {
        Some(name) if !name.trim().is_empty() => name.clone(),
        _ => UNASSIGNED.to_string(),
    }
}

/// 5×5 likelihood/severity tally of a set of risks, with per-band totals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RiskMatrix {
    cells: [[u32; 5]; 5],
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl RiskMatrix {
    /// Tally views by their effective likelihood/severity; band totals use
    /// the residual band, matching what the list badges show.
    pub fn tally(views: &[RiskView]) -> Self {
        let mut matrix = Self::default();
        for view in views {
            let row = (view.likelihood.ordinal() - 1) as usize;
            let column = (view.severity.ordinal() - 1) as usize;
            matrix.cells[row][column] += 1;
            match view.residual.band {
                RiskBand::Low => matrix.low += 1,
                RiskBand::Medium => matrix.medium += 1,
                RiskBand::High => matrix.high += 1,
                RiskBand::Critical => matrix.critical += 1,
            }
        }
        matrix
    }

    /// Count of risks sitting at a given cell.
    pub fn cell(&self, likelihood: Likelihood, severity: Severity) -> u32 {
        self.cells[(likelihood.ordinal() - 1) as usize][(severity.ordinal() - 1) as usize]
    }

    pub fn total(&self) -> u32 {
        self.low + self.medium + self.high + self.critical
    }
}
