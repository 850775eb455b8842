//! Risk scoring engine.
//!
//! Score = likelihood ordinal × severity ordinal (1..=25), banded through a
//! configurable threshold ladder. Every function here is pure and total:
//! missing or out-of-range inputs degrade to the documented midpoint
//! defaults so a render pass can never fail on partial backend data. The
//! same tables serve badge rendering, matrix cells, and sort ordering, so
//! no view can drift from another.

use serde::{Deserialize, Serialize};

use crate::config::BandThresholds;
use crate::models::enums::{
    ActionPriority, ActionStatus, BackendOrdinal, Likelihood, RiskStatus, Severity,
};

/// Qualitative classification of a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskBand {
    /// Color token consumed by the UI layer.
    pub fn color(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Four-band display priority shared by actions, causes, and consequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayPriority {
    Low,
    Medium,
    High,
    Highest,
}

impl DisplayPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Highest => "highest",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Rank used for sort ordering, higher sorts first.
    pub fn sort_weight(self) -> u8 {
        match self {
            Self::Highest => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl std::fmt::Display for DisplayPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display status for a remediation action badge.
///
/// `Delayed` maps to `Open`; the tracker layers overdue on top from the due
/// date, and that flag takes display precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayStatus {
    Open,
    InProgress,
    Completed,
    Disabled,
}

impl DisplayStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Disabled => "disabled",
        }
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traffic-light grouping of the risk workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatusColor {
    Open,
    Mitigated,
    Closed,
}

impl RiskStatusColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Mitigated => "mitigated",
            Self::Closed => "closed",
        }
    }
}

/// A classified risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub band: RiskBand,
}

/// Classify a likelihood/severity pair into a score and band.
///
/// Missing factors default to the midpoint (3) so the function is total.
pub fn classify_risk(
    likelihood: Option<Likelihood>,
    severity: Option<Severity>,
    thresholds: &BandThresholds,
) -> RiskAssessment {
    let l = likelihood.unwrap_or(Likelihood::DEFAULT).ordinal();
    let s = severity.unwrap_or(Severity::DEFAULT).ordinal();
    let score = l * s;
    RiskAssessment {
        score,
        band: band_for_score(score, thresholds),
    }
}

/// Band a raw score through the threshold ladder.
pub fn band_for_score(score: u8, thresholds: &BandThresholds) -> RiskBand {
    if score >= thresholds.critical_min {
        RiskBand::Critical
    } else if score >= thresholds.high_min {
        RiskBand::High
    } else if score >= thresholds.medium_min {
        RiskBand::Medium
    } else {
        RiskBand::Low
    }
}

/// Map a backend action priority onto the four-band display vocabulary.
pub fn classify_action_priority(priority: Option<ActionPriority>) -> DisplayPriority {
    match priority {
        Some(ActionPriority::Low) => DisplayPriority::Low,
        Some(ActionPriority::Medium) | None => DisplayPriority::Medium,
        Some(ActionPriority::High) => DisplayPriority::High,
        Some(ActionPriority::Urgent) | Some(ActionPriority::Immediate) => DisplayPriority::Highest,
    }
}

/// Map a backend action status onto the display vocabulary.
pub fn classify_action_status(status: Option<ActionStatus>) -> DisplayStatus {
    match status {
        Some(ActionStatus::NotStarted) | Some(ActionStatus::Delayed) | None => DisplayStatus::Open,
        Some(ActionStatus::InProgress) => DisplayStatus::InProgress,
        Some(ActionStatus::Completed) => DisplayStatus::Completed,
        Some(ActionStatus::Cancelled) | Some(ActionStatus::OnHold) => DisplayStatus::Disabled,
    }
}

/// Derive a cause's priority band from its likelihood × severity, using the
/// same thresholds as [`classify_risk`].
pub fn derive_priority(
    likelihood: Option<Likelihood>,
    severity: Option<Severity>,
    thresholds: &BandThresholds,
) -> DisplayPriority {
    match classify_risk(likelihood, severity, thresholds).band {
        RiskBand::Critical => DisplayPriority::Highest,
        RiskBand::High => DisplayPriority::High,
        RiskBand::Medium => DisplayPriority::Medium,
        RiskBand::Low => DisplayPriority::Low,
    }
}

/// Derive a consequence's priority band from its severity alone.
pub fn derive_priority_from_severity(severity: Option<Severity>) -> DisplayPriority {
    match severity.unwrap_or(Severity::DEFAULT) {
        Severity::Critical => DisplayPriority::Highest,
        Severity::Major => DisplayPriority::High,
        Severity::Moderate => DisplayPriority::Medium,
        Severity::Minor | Severity::Negligible => DisplayPriority::Low,
    }
}

/// Group a risk workflow status into its traffic-light color.
pub fn risk_status_color(status: Option<RiskStatus>) -> RiskStatusColor {
    match status {
        Some(RiskStatus::Mitigated) => RiskStatusColor::Mitigated,
        Some(RiskStatus::Closed) => RiskStatusColor::Closed,
        _ => RiskStatusColor::Open,
    }
}

/// Display label for a risk workflow status, `"Open"` when absent.
pub fn risk_status_label(status: Option<RiskStatus>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "Open".to_string(),
    }
}
