//! Backend enum contract shared across all risk entities.
//!
//! The backend serializes every enum as its ordinal (1-based). Strict
//! `TryFrom`/`Into` conversions back the serde representation; DTO fields
//! additionally go through [`lenient`] so an out-of-range ordinal from a
//! partial or malformed payload degrades to `None` instead of failing the
//! whole decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordinal value outside the enum's backend-defined range.
#[derive(Debug, thiserror::Error)]
#[error("{value} is not a valid {kind} ordinal")]
pub struct OutOfRange {
    pub kind: &'static str,
    pub value: u8,
}

/// An enum backed by a 1-based backend ordinal.
pub trait BackendOrdinal: Sized + Copy {
    const NAME: &'static str;

    fn from_ordinal(value: u8) -> Option<Self>;
    fn ordinal(self) -> u8;
}

macro_rules! ordinal_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $ordinal:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(try_from = "u8", into = "u8")]
        pub enum $name {
            $($variant = $ordinal),+
        }

        impl BackendOrdinal for $name {
            const NAME: &'static str = stringify!($name);

            fn from_ordinal(value: u8) -> Option<Self> {
                match value {
                    $($ordinal => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn ordinal(self) -> u8 {
                self as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = OutOfRange;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                Self::from_ordinal(value).ok_or(OutOfRange {
                    kind: Self::NAME,
                    value,
                })
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value.ordinal()
            }
        }
    };
}

ordinal_enum! {
    /// How likely a risk, or one of its causes, is to materialize.
    Likelihood {
        Rare = 1,
        Unlikely = 2,
        Possible = 3,
        Likely = 4,
        AlmostCertain = 5,
    }
}

ordinal_enum! {
    /// Impact of a risk or consequence should it materialize.
    Severity {
        Negligible = 1,
        Minor = 2,
        Moderate = 3,
        Major = 4,
        Critical = 5,
    }
}

ordinal_enum! {
    /// Backend priority assigned to a remediation action.
    ActionPriority {
        Low = 1,
        Medium = 2,
        High = 3,
        Urgent = 4,
        Immediate = 5,
    }
}

ordinal_enum! {
    /// Workflow status of a remediation action.
    ActionStatus {
        NotStarted = 1,
        InProgress = 2,
        Completed = 3,
        Delayed = 4,
        Cancelled = 5,
        OnHold = 6,
    }
}

ordinal_enum! {
    /// Workflow status of the risk itself.
    RiskStatus {
        Identified = 1,
        UnderAssessment = 2,
        Assessed = 3,
        Mitigating = 4,
        Mitigated = 5,
        Closed = 6,
        Reopened = 7,
    }
}

ordinal_enum! {
    /// Which side of the bowtie an action belongs to.
    ActionType {
        Preventive = 1,
        Mitigation = 2,
    }
}

impl Likelihood {
    /// Midpoint default used when the backend omits the value.
    pub const DEFAULT: Likelihood = Likelihood::Possible;

    /// Short matrix-axis code, `"L1"` through `"L5"`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Rare => "L1",
            Self::Unlikely => "L2",
            Self::Possible => "L3",
            Self::Likely => "L4",
            Self::AlmostCertain => "L5",
        }
    }

    /// Inverse of [`Likelihood::code`]. Unrecognized codes fall back to the
    /// midpoint so editing round-trips never fail on stale display values.
    pub fn from_code(code: &str) -> Likelihood {
        match code {
            "L1" => Self::Rare,
            "L2" => Self::Unlikely,
            "L3" => Self::Possible,
            "L4" => Self::Likely,
            "L5" => Self::AlmostCertain,
            other => {
                tracing::warn!(code = other, "unrecognized likelihood code, using midpoint");
                Self::DEFAULT
            }
        }
    }
}

impl Severity {
    /// Midpoint default used when the backend omits the value.
    pub const DEFAULT: Severity = Severity::Moderate;

    /// Short matrix-axis code, `"S1"` through `"S5"`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Negligible => "S1",
            Self::Minor => "S2",
            Self::Moderate => "S3",
            Self::Major => "S4",
            Self::Critical => "S5",
        }
    }

    /// Inverse of [`Severity::code`]. Unrecognized codes fall back to the
    /// midpoint.
    pub fn from_code(code: &str) -> Severity {
        match code {
            "S1" => Self::Negligible,
            "S2" => Self::Minor,
            "S3" => Self::Moderate,
            "S4" => Self::Major,
            "S5" => Self::Critical,
            other => {
                tracing::warn!(code = other, "unrecognized severity code, using midpoint");
                Self::DEFAULT
            }
        }
    }
}

impl std::fmt::Display for Likelihood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Rare => "Rare",
            Self::Unlikely => "Unlikely",
            Self::Possible => "Possible",
            Self::Likely => "Likely",
            Self::AlmostCertain => "Almost Certain",
        };
        f.write_str(label)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Negligible => "Negligible",
            Self::Minor => "Minor",
            Self::Moderate => "Moderate",
            Self::Major => "Major",
            Self::Critical => "Critical",
        };
        f.write_str(label)
    }
}

impl std::fmt::Display for ActionPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
            Self::Immediate => "Immediate",
        };
        f.write_str(label)
    }
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Delayed => "Delayed",
            Self::Cancelled => "Cancelled",
            Self::OnHold => "On Hold",
        };
        f.write_str(label)
    }
}

impl std::fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Identified => "Identified",
            Self::UnderAssessment => "Under Assessment",
            Self::Assessed => "Assessed",
            Self::Mitigating => "Mitigating",
            Self::Mitigated => "Mitigated",
            Self::Closed => "Closed",
            Self::Reopened => "Reopened",
        };
        f.write_str(label)
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Preventive => "Preventive",
            Self::Mitigation => "Mitigation",
        };
        f.write_str(label)
    }
}

/// Lenient decoder for optional enum fields on backend DTOs.
///
/// `null`, a missing field, a non-numeric value, or an out-of-range ordinal
/// all decode to `None` (with a warning), so one bad field never fails the
/// whole payload.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: BackendOrdinal,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            let parsed = n
                .as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .and_then(T::from_ordinal);
            if parsed.is_none() {
                tracing::warn!(value = %n, kind = T::NAME, "out-of-range enum ordinal from backend, treating as absent");
            }
            Ok(parsed)
        }
        Some(other) => {
            tracing::warn!(value = %other, kind = T::NAME, "non-numeric enum ordinal from backend, treating as absent");
            Ok(None)
        }
    }
}
