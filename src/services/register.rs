//! Owned-state risk register.
//!
//! A single state object with explicit update methods, in place of the
//! ambient subscription-based mutation the UI previously relied on. Each
//! update validates its payload, applies it to the owned DTO, and hands the
//! validated payload back so the HTTP layer can PUT it unchanged; what the
//! user sees and what gets persisted come from the same value. Stored risk
//! levels are rewritten from their factors on every update, so no path can
//! persist a score inconsistent with its likelihood and severity.

use std::collections::BTreeMap;

use validator::Validate;

use crate::config::ScoringConfig;
use crate::errors::AppError;
use crate::models::action::{UpdateMitigationActionDto, UpdatePreventionActionDto};
use crate::models::bowtie::{UpdateCauseDto, UpdateConsequenceDto};
use crate::models::enums::BackendOrdinal;
use crate::models::risk::{RiskDto, UpdateRiskDto};
use crate::services::bowtie::RiskView;

/// In-memory register of risks, keyed by backend id.
#[derive(Debug, Default)]
pub struct RiskRegister {
    risks: BTreeMap<i64, RiskDto>,
}

impl RiskRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the register contents with a fresh backend load.
    pub fn load(&mut self, risks: Vec<RiskDto>) {
        self.risks = risks.into_iter().map(|risk| (risk.id, risk)).collect();
    }

    /// Insert or replace a single risk.
    pub fn insert(&mut self, risk: RiskDto) {
        self.risks.insert(risk.id, risk);
    }

    pub fn len(&self) -> usize {
        self.risks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.risks.is_empty()
    }

    pub fn get(&self, risk_id: i64) -> Option<&RiskDto> {
        self.risks.get(&risk_id)
    }

    /// Build the view for one risk, with all derived fields recomputed.
    pub fn view(&self, risk_id: i64, config: &ScoringConfig) -> Result<RiskView, AppError> {
        self.risks
            .get(&risk_id)
            .map(|risk| RiskView::from_dto(risk, config))
            .ok_or_else(|| AppError::NotFound(format!("risk {risk_id}")))
    }

    /// Build views for every risk in the register.
    pub fn views(&self, config: &ScoringConfig) -> Vec<RiskView> {
        self.risks
            .values()
            .map(|risk| RiskView::from_dto(risk, config))
            .collect()
    }

    /// Update a risk header. Returns the validated PUT payload.
    pub fn update_risk(
        &mut self,
        risk_id: i64,
        update: UpdateRiskDto,
    ) -> Result<UpdateRiskDto, AppError> {
        update.validate()?;
        let risk = self.risk_mut(risk_id)?;

        risk.description = Some(update.description.clone());
        risk.status = Some(update.status);
        risk.business_domain = update.business_domain.clone();
        risk.risk_owner = update.risk_owner.clone();
        risk.review_date = update.review_date;
        risk.trigger_events = update.trigger_events.clone();
        risk.initial_likelihood = Some(update.initial_likelihood);
        risk.initial_severity = Some(update.initial_severity);
        risk.residual_likelihood = Some(update.residual_likelihood);
        risk.residual_severity = Some(update.residual_severity);
        risk.initial_risk_level =
            i32::from(update.initial_likelihood.ordinal()) * i32::from(update.initial_severity.ordinal());
        risk.residual_risk_level = i32::from(update.residual_likelihood.ordinal())
            * i32::from(update.residual_severity.ordinal());

        tracing::debug!(risk_id, "risk header updated");
        Ok(update)
    }

    /// Update a cause. Returns the validated PUT payload.
    pub fn update_cause(
        &mut self,
        risk_id: i64,
        cause_id: i64,
        update: UpdateCauseDto,
    ) -> Result<UpdateCauseDto, AppError> {
        update.validate()?;
        let risk = self.risk_mut(risk_id)?;
        let cause = risk
            .causes
            .iter_mut()
            .find(|cause| cause.id == cause_id)
            .ok_or_else(|| AppError::NotFound(format!("cause {cause_id} on risk {risk_id}")))?;

        cause.description = Some(update.description.clone());
        cause.likelihood = Some(update.likelihood);
        cause.severity = Some(update.severity);

        tracing::debug!(risk_id, cause_id, "cause updated");
        Ok(update)
    }

    /// Update a consequence. Returns the validated PUT payload.
    pub fn update_consequence(
        &mut self,
        risk_id: i64,
        consequence_id: i64,
        update: UpdateConsequenceDto,
    ) -> Result<UpdateConsequenceDto, AppError> {
        update.validate()?;
        let risk = self.risk_mut(risk_id)?;
        let consequence = risk
            .consequences
            .iter_mut()
            .find(|consequence| consequence.id == consequence_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("consequence {consequence_id} on risk {risk_id}"))
            })?;

        consequence.description = Some(update.description.clone());
        consequence.severity = Some(update.severity);
        consequence.potential_cost = update.potential_cost;

        tracing::debug!(risk_id, consequence_id, "consequence updated");
        Ok(update)
    }

    /// Update a preventive action. Returns the validated PUT payload.
    pub fn update_prevention_action(
        &mut self,
        risk_id: i64,
        cause_id: i64,
        action_id: i64,
        update: UpdatePreventionActionDto,
    ) -> Result<UpdatePreventionActionDto, AppError> {
        update.validate()?;
        let risk = self.risk_mut(risk_id)?;
        let cause = risk
            .causes
            .iter_mut()
            .find(|cause| cause.id == cause_id)
            .ok_or_else(|| AppError::NotFound(format!("cause {cause_id} on risk {risk_id}")))?;
        let action = cause
            .prevention_actions
            .iter_mut()
            .find(|action| action.id == action_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("prevention action {action_id} on cause {cause_id}"))
            })?;

        action.description = Some(update.description.clone());
        action.cost = update.cost;
        action.priority = Some(update.priority);
        action.assigned_to = update.assigned_to.clone();
        action.due_date = update.due_date;
        if let Some(status) = update.status {
            action.status = Some(status);
        }

        tracing::debug!(risk_id, cause_id, action_id, "prevention action updated");
        Ok(update)
    }

    /// Update a mitigation action. Returns the validated PUT payload.
    pub fn update_mitigation_action(
        &mut self,
        risk_id: i64,
        consequence_id: i64,
        action_id: i64,
        update: UpdateMitigationActionDto,
    ) -> Result<UpdateMitigationActionDto, AppError> {
        update.validate()?;
        let risk = self.risk_mut(risk_id)?;
        let consequence = risk
            .consequences
            .iter_mut()
            .find(|consequence| consequence.id == consequence_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("consequence {consequence_id} on risk {risk_id}"))
            })?;
        let action = consequence
            .mitigation_actions
            .iter_mut()
            .find(|action| action.id == action_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "mitigation action {action_id} on consequence {consequence_id}"
                ))
            })?;

        action.description = Some(update.description.clone());
        action.estimated_cost = update.estimated_cost;
        action.priority = Some(update.priority);
        action.assigned_to = update.assigned_to.clone();
        action.due_date = update.due_date;
        if let Some(status) = update.status {
            action.status = Some(status);
        }

        tracing::debug!(risk_id, consequence_id, action_id, "mitigation action updated");
        Ok(update)
    }

    /// Remove a cause (and its actions) after a successful backend DELETE.
    pub fn remove_cause(&mut self, risk_id: i64, cause_id: i64) -> Result<(), AppError> {
        let risk = self.risk_mut(risk_id)?;
        let before = risk.causes.len();
        risk.causes.retain(|cause| cause.id != cause_id);
        if risk.causes.len() == before {
            return Err(AppError::NotFound(format!("cause {cause_id} on risk {risk_id}")));
        }
        Ok(())
    }

    /// Remove a consequence (and its actions) after a successful backend DELETE.
    pub fn remove_consequence(
        &mut self,
        risk_id: i64,
        consequence_id: i64,
    ) -> Result<(), AppError> {
        let risk = self.risk_mut(risk_id)?;
        let before = risk.consequences.len();
        risk.consequences.retain(|consequence| consequence.id != consequence_id);
        if risk.consequences.len() == before {
            return Err(AppError::NotFound(format!(
                "consequence {consequence_id} on risk {risk_id}"
            )));
        }
        Ok(())
    }

    fn risk_mut(&mut self, risk_id: i64) -> Result<&mut RiskDto, AppError> {
        self.risks
            .get_mut(&risk_id)
            .ok_or_else(|| AppError::NotFound(format!("risk {risk_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{ActionPriority, ActionStatus, Likelihood, RiskStatus, Severity};
    use crate::services::scoring::{DisplayPriority, RiskBand};
    use serde_json::json;

    fn seeded_register() -> RiskRegister {
        let dto: RiskDto = serde_json::from_value(json!({
            "id": 7,
            "riskId": "RISK-007",
            "status": 1,
            "description": "Service outage",
            "initialLikelihood": 3,
            "initialSeverity": 3,
            "causes": [{
                "id": 70,
                "description": "Single point of failure",
                "likelihood": 2,
                "severity": 3,
                "preventionActions": [{
                    "id": 700,
                    "description": "Add redundancy",
                    "cost": 10000.0,
                    "priority": 3,
                    "status": 1
                }]
            }],
            "consequences": [{
                "id": 71,
                "description": "SLA penalties",
                "severity": 3,
                "potentialCost": 50000.0,
                "mitigationActions": [{
                    "id": 710,
                    "description": "Customer comms plan",
                    "estimatedCost": 500.0,
                    "priority": 2,
                    "status": 1
                }]
            }]
        }))
        .unwrap();
        let mut register = RiskRegister::new();
        register.load(vec![dto]);
        register
    }

    #[test]
    fn load_and_view() {
        let register = seeded_register();
        assert_eq!(register.len(), 1);
        let view = register.view(7, &ScoringConfig::default()).unwrap();
        assert_eq!(view.code, "RISK-007");
        assert_eq!(view.causes.len(), 1);
        assert!(register.view(99, &ScoringConfig::default()).unwrap_err().is_not_found());
    }

    #[test]
    fn cause_update_recomputes_derived_priority() {
        let mut register = seeded_register();
        let config = ScoringConfig::default();

        let before = register.view(7, &config).unwrap();
        assert_eq!(before.causes[0].priority, DisplayPriority::Medium);

        let payload = register
            .update_cause(
                7,
                70,
                UpdateCauseDto {
                    description: "Single point of failure".into(),
                    likelihood: Likelihood::AlmostCertain,
                    severity: Severity::Major,
                },
            )
            .unwrap();
        assert_eq!(payload.likelihood, Likelihood::AlmostCertain);

        let after = register.view(7, &config).unwrap();
        assert_eq!(after.causes[0].priority, DisplayPriority::Highest);
    }

    #[test]
    fn risk_update_keeps_stored_levels_consistent() {
        let mut register = seeded_register();
        register
            .update_risk(
                7,
                UpdateRiskDto {
                    description: "Service outage".into(),
                    status: RiskStatus::Assessed,
                    business_domain: Some("Operations".into()),
                    risk_owner: Some("COO".into()),
                    review_date: None,
                    trigger_events: vec![],
                    initial_likelihood: Likelihood::Likely,
                    initial_severity: Severity::Critical,
                    residual_likelihood: Likelihood::Unlikely,
                    residual_severity: Severity::Moderate,
                },
            )
            .unwrap();

        let dto = register.get(7).unwrap();
        assert_eq!(dto.initial_risk_level, 20);
        assert_eq!(dto.residual_risk_level, 6);

        let view = register.view(7, &ScoringConfig::default()).unwrap();
        assert_eq!(view.initial.score, 20);
        assert_eq!(view.initial.band, RiskBand::Critical);
        assert_eq!(view.residual.score, 6);
    }

    #[test]
    fn action_update_round_trip_payload_matches_view() {
        let mut register = seeded_register();
        let payload = register
            .update_prevention_action(
                7,
                70,
                700,
                UpdatePreventionActionDto {
                    description: "Add redundancy".into(),
                    cost: 12000.0,
                    priority: ActionPriority::Urgent,
                    assigned_to: Some("Platform team".into()),
                    due_date: None,
                    status: Some(ActionStatus::InProgress),
                },
            )
            .unwrap();

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["priority"], 4);
        assert_eq!(json["status"], 2);

        let view = register.view(7, &ScoringConfig::default()).unwrap();
        let action = &view.causes[0].preventive_actions[0];
        assert_eq!(action.priority, DisplayPriority::Highest);
        assert_eq!(action.cost, 12000.0);
        assert_eq!(action.assigned_to, "Platform team");
    }

    #[test]
    fn invalid_update_is_rejected_before_applying() {
        let mut register = seeded_register();
        let result = register.update_consequence(
            7,
            71,
            UpdateConsequenceDto {
                description: String::new(),
                severity: Severity::Major,
                potential_cost: -1.0,
            },
        );
        assert!(result.unwrap_err().is_validation());
        // Owned state untouched.
        assert_eq!(register.get(7).unwrap().consequences[0].potential_cost, 50000.0);
    }

    #[test]
    fn unknown_targets_are_not_found() {
        let mut register = seeded_register();
        let update = UpdateCauseDto {
            description: "x".into(),
            likelihood: Likelihood::Rare,
            severity: Severity::Minor,
        };
        assert!(register.update_cause(99, 70, update.clone()).unwrap_err().is_not_found());
        assert!(register.update_cause(7, 99, update).unwrap_err().is_not_found());
    }

    #[test]
    fn remove_cause_and_consequence() {
        let mut register = seeded_register();
        register.remove_cause(7, 70).unwrap();
        assert!(register.get(7).unwrap().causes.is_empty());
        assert!(register.remove_cause(7, 70).unwrap_err().is_not_found());
        register.remove_consequence(7, 71).unwrap();
        assert!(register.remove_consequence(7, 71).unwrap_err().is_not_found());
    }
}
