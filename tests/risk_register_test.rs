//! End-to-end test: raw backend JSON through ingestion, the register,
//! view construction, tracker and cost/benefit aggregation, and an
//! editing round-trip.

use chrono::NaiveDate;
use riskwise::config::ScoringConfig;
use riskwise::ingest;
use riskwise::models::bowtie::UpdateCauseDto;
use riskwise::models::enums::{Likelihood, Severity};
use riskwise::services::action_tracker::{self, TrackerStatus, TrackerTab};
use riskwise::services::bowtie::RiskMatrix;
use riskwise::services::cost_benefit::CostBenefitAnalysis;
use riskwise::services::register::RiskRegister;
use riskwise::services::scoring::{DisplayPriority, RiskBand, RiskStatusColor};

const PAYLOAD: &str = r#"[
    {
        "id": 1,
        "riskId": "RISK-001",
        "status": 4,
        "description": "Data breach due to unauthorized access",
        "businessDomain": "IT Security",
        "riskOwner": "CISO",
        "reviewDate": "2026-09-30",
        "triggerEvents": ["credential leak detected"],
        "initialLikelihood": 5,
        "initialSeverity": 5,
        "initialRiskLevel": 25,
        "residualLikelihood": 3,
        "residualSeverity": 4,
        "residualRiskLevel": 99,
        "requiresImmediateAction": true,
        "causes": [
            {
                "id": 10,
                "description": "Weak password policy",
                "likelihood": 4,
                "severity": 4,
                "probability": 0.5,
                "preventionActions": [
                    {
                        "id": 100,
                        "description": "Enforce MFA",
                        "cost": 5000.0,
                        "priority": 5,
                        "status": 4,
                        "assignedTo": "Identity Team",
                        "dueDate": "2026-05-01"
                    },
                    {
                        "id": 101,
                        "description": "Password manager rollout",
                        "cost": 2000.0,
                        "priority": 2,
                        "status": 3,
                        "dueDate": "2026-02-01"
                    }
                ]
            },
            {
                "id": 11,
                "description": "Unmonitored admin accounts",
                "likelihood": 9,
                "severity": 3,
                "preventionActions": []
            }
        ],
        "consequences": [
            {
                "id": 20,
                "description": "Regulatory fine",
                "severity": 5,
                "potentialCost": 250000.0,
                "mitigationActions": [
                    {
                        "id": 200,
                        "description": "Breach notification playbook",
                        "estimatedCost": 3000.0,
                        "priority": 3,
                        "status": 2,
                        "assignedTo": "Legal",
                        "dueDate": "2026-08-15"
                    }
                ]
            }
        ]
    },
    {
        "id": 2,
        "riskId": "RISK-002",
        "status": 5,
        "description": "Office flooding",
        "initialLikelihood": 1,
        "initialSeverity": 2,
        "residualLikelihood": 1,
        "residualSeverity": 1
    }
]"#;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
}

#[test]
fn full_pipeline() {
    let config = ScoringConfig::default();

    // Ingest: strict envelope, lenient fields.
    let risks = ingest::parse_risks(PAYLOAD.as_bytes()).expect("payload decodes");
    let mut register = RiskRegister::new();
    register.load(risks);
    assert_eq!(register.len(), 2);

    // Views recompute every derived value from the factors.
    let view = register.view(1, &config).unwrap();
    assert_eq!(view.code, "RISK-001");
    assert_eq!(view.initial.score, 25);
    assert_eq!(view.initial.band, RiskBand::Critical);
    // Stored residualRiskLevel of 99 is ignored: 3 * 4 = 12.
    assert_eq!(view.residual.score, 12);
    assert_eq!(view.residual.band, RiskBand::High);
    assert_eq!(view.status_label, "Mitigating");
    assert_eq!(view.status_color, RiskStatusColor::Open);

    // Bowtie tree with derived priorities.
    assert_eq!(view.causes.len(), 2);
    let weak_passwords = &view.causes[0];
    assert_eq!(weak_passwords.priority, DisplayPriority::High); // 4 * 4 = 16
    assert_eq!(weak_passwords.preventive_actions.len(), 2);
    // Out-of-range likelihood (9) degraded at ingest, derives from midpoint.
    let unmonitored = &view.causes[1];
    assert_eq!(unmonitored.likelihood, Likelihood::Possible);
    assert_eq!(unmonitored.priority, DisplayPriority::Medium);
    let fine = &view.consequences[0];
    assert_eq!(fine.priority, DisplayPriority::Highest);
    assert_eq!(fine.severity, Severity::Critical);

    // Tracker aggregation with overdue precedence.
    let views = register.views(&config);
    let items = action_tracker::collect_items(&views, today());
    assert_eq!(items.len(), 3);
    let mfa = items.iter().find(|item| item.action_id == 100).unwrap();
    assert_eq!(mfa.status, TrackerStatus::Overdue); // Delayed + past due
    assert_eq!(mfa.days_overdue, 45);
    assert_eq!(mfa.priority, DisplayPriority::Highest);
    let rollout = items.iter().find(|item| item.action_id == 101).unwrap();
    assert_eq!(rollout.status, TrackerStatus::Completed); // completed, never overdue
    let playbook = items.iter().find(|item| item.action_id == 200).unwrap();
    assert_eq!(playbook.status, TrackerStatus::InProgress);

    let summary = action_tracker::StatusSummary::from_items(&items);
    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.in_progress, 1);
    assert_eq!(summary.completion_percentage, 33);
    assert_eq!(action_tracker::filter_items(&items, TrackerTab::Upcoming).len(), 1);

    // Matrix tally over effective (residual) factors.
    let matrix = RiskMatrix::tally(&views);
    assert_eq!(matrix.cell(Likelihood::Possible, Severity::Major), 1);
    assert_eq!(matrix.cell(Likelihood::Rare, Severity::Negligible), 1);
    assert_eq!(matrix.high, 1);
    assert_eq!(matrix.low, 1);

    // Cost/benefit over the full bowtie.
    let analysis = CostBenefitAnalysis::compute(register.get(1).unwrap());
    assert_eq!(analysis.implementation_costs.total_implementation_cost, 10000.0);
    assert_eq!(analysis.potential_consequence_costs.total_potential_cost, 250000.0);
    assert_eq!(analysis.net_benefit, 240000.0);

    // Editing round-trip: the emitted payload and the refreshed view agree.
    let payload = register
        .update_cause(
            1,
            11,
            UpdateCauseDto {
                description: "Unmonitored admin accounts".into(),
                likelihood: Likelihood::AlmostCertain,
                severity: Severity::Critical,
            },
        )
        .unwrap();
    let wire = serde_json::to_value(&payload).unwrap();
    assert_eq!(wire["likelihood"], 5);
    assert_eq!(wire["severity"], 5);

    let refreshed = register.view(1, &config).unwrap();
    assert_eq!(refreshed.causes[1].priority, DisplayPriority::Highest);
}
