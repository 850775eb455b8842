//! Cost/benefit aggregation over a risk's bowtie.
//!
//! Compares what implementing every action would cost against the
//! potential cost of the consequences those actions defend against.

use serde::Serialize;

use crate::models::enums::Severity;
use crate::models::risk::RiskDto;

/// Action implementation costs, split by bowtie side.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationCosts {
    pub preventive_actions_cost: f64,
    pub mitigation_actions_cost: f64,
    pub total_implementation_cost: f64,
}

/// One consequence's share of the potential downside.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsequenceCostItem {
    pub description: String,
    pub potential_cost: f64,
    pub severity: String,
}

/// All consequence costs with their total.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PotentialConsequenceCosts {
    pub consequence_costs: Vec<ConsequenceCostItem>,
    pub total_potential_cost: f64,
}

/// Full cost/benefit picture for one risk.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostBenefitAnalysis {
    pub implementation_costs: ImplementationCosts,
    pub potential_consequence_costs: PotentialConsequenceCosts,
    pub net_benefit: f64,
    pub net_benefit_description: String,
}

impl CostBenefitAnalysis {
    pub fn compute(dto: &RiskDto) -> Self {
        let preventive_actions_cost: f64 = dto
            .causes
            .iter()
            .flat_map(|cause| &cause.prevention_actions)
            .map(|action| action.cost)
            .sum();
        let mitigation_actions_cost: f64 = dto
            .consequences
            .iter()
            .flat_map(|consequence| &consequence.mitigation_actions)
            .map(|action| action.estimated_cost)
            .sum();
        let total_implementation_cost = preventive_actions_cost + mitigation_actions_cost;

        let consequence_costs: Vec<ConsequenceCostItem> = dto
            .consequences
            .iter()
            .map(|consequence| ConsequenceCostItem {
                description: consequence.description.clone().unwrap_or_default(),
                potential_cost: consequence.potential_cost,
                severity: consequence.severity.unwrap_or(Severity::DEFAULT).to_string(),
            })
            .collect();
        let total_potential_cost: f64 =
            consequence_costs.iter().map(|item| item.potential_cost).sum();

        let net_benefit = total_potential_cost - total_implementation_cost;
        let net_benefit_description = if net_benefit >= 0.0 {
            format!("Implementing all actions avoids an estimated {net_benefit:.2} in consequence costs")
        } else {
            format!(
                "Action costs exceed potential consequence costs by {:.2}",
                net_benefit.abs()
            )
        };

        Self {
            implementation_costs: ImplementationCosts {
                preventive_actions_cost,
                mitigation_actions_cost,
                total_implementation_cost,
            },
            potential_consequence_costs: PotentialConsequenceCosts {
                consequence_costs,
                total_potential_cost,
            },
            net_benefit,
            net_benefit_description,
        }
    }
}
