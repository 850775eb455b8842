//! Ingestion boundary for backend payloads.
//!
//! The JSON envelope is decoded strictly, the field content leniently:
//! out-of-range enum ordinals and unparseable dates degrade to documented
//! defaults inside the DTO decoders, and legacy field aliases are collapsed
//! to the canonical schema here, exactly once. Downstream code never sees a
//! fallback chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::risk::RiskDto;

/// Decode a list payload of risks.
pub fn parse_risks(data: &[u8]) -> Result<Vec<RiskDto>, AppError> {
    let risks: Vec<RiskDto> = serde_json::from_slice(data)?;
    tracing::debug!(count = risks.len(), "ingested risk payload");
    Ok(risks)
}

/// Decode a single risk payload.
pub fn parse_risk(data: &[u8]) -> Result<RiskDto, AppError> {
    Ok(serde_json::from_slice(data)?)
}

/// A comment as the backend emits it. Older records carry the text in
/// `comment` rather than `content`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCommentDto {
    pub id: i64,
    pub content: Option<String>,
    pub comment: Option<String>,
    pub author: Option<String>,
    pub creation_time: Option<String>,
}

/// Canonical action comment.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActionComment {
    pub id: i64,
    pub content: String,
    pub author: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl ActionComment {
    /// Collapse the legacy `content`/`comment` alias into one field.
    pub fn normalize(raw: RawCommentDto) -> Self {
        let content = match (raw.content, raw.comment) {
            (Some(content), _) if !content.is_empty() => content,
            (_, Some(legacy)) if !legacy.is_empty() => {
                tracing::debug!(id = raw.id, "comment uses legacy field, migrating");
                legacy
            }
            _ => String::new(),
        };
        let created_at = raw.creation_time.as_deref().and_then(|value| {
            DateTime::parse_from_rfc3339(value)
                .map(|datetime| datetime.with_timezone(&Utc))
                .ok()
        });
        Self {
            id: raw.id,
            content,
            author: raw.author.unwrap_or_default(),
            created_at,
        }
    }
}

/// Decode and normalize a comment list payload.
pub fn parse_comments(data: &[u8]) -> Result<Vec<ActionComment>, AppError> {
    let raw: Vec<RawCommentDto> = serde_json::from_slice(data)?;
    Ok(raw.into_iter().map(ActionComment::normalize).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{Likelihood, Severity};

    #[test]
    fn parses_risk_list() {
        let data = br#"[{"id": 1}, {"id": 2, "initialLikelihood": 4}]"#;
        let risks = parse_risks(data).unwrap();
        assert_eq!(risks.len(), 2);
        assert_eq!(risks[1].initial_likelihood, Some(Likelihood::Likely));
    }

    #[test]
    fn malformed_envelope_is_an_error() {
        assert!(parse_risks(b"{not json").unwrap_err().to_string().contains("Malformed"));
        assert!(parse_risk(br#"{"description": "missing id"}"#).is_err());
    }

    #[test]
    fn bad_field_content_degrades_instead_of_failing() {
        let data = br#"{
            "id": 9,
            "status": 42,
            "initialSeverity": 3,
            "reviewDate": "not-a-date",
            "causes": [{"id": 90, "likelihood": 0}]
        }"#;
        let risk = parse_risk(data).unwrap();
        assert_eq!(risk.status, None);
        assert_eq!(risk.initial_severity, Some(Severity::Moderate));
        assert_eq!(risk.review_date, None);
        assert_eq!(risk.causes[0].likelihood, None);
    }

    #[test]
    fn comment_normalization_prefers_canonical_field() {
        let both = RawCommentDto {
            id: 1,
            content: Some("current".into()),
            comment: Some("legacy".into()),
            author: Some("reviewer".into()),
            creation_time: Some("2026-01-10T08:00:00Z".into()),
        };
        let normalized = ActionComment::normalize(both);
        assert_eq!(normalized.content, "current");
        assert!(normalized.created_at.is_some());
    }

    #[test]
    fn comment_normalization_migrates_legacy_field() {
        let legacy = RawCommentDto {
            id: 2,
            content: None,
            comment: Some("old text".into()),
            author: None,
            creation_time: None,
        };
        let normalized = ActionComment::normalize(legacy);
        assert_eq!(normalized.content, "old text");
        assert_eq!(normalized.author, "");
        assert_eq!(normalized.created_at, None);
    }

    #[test]
    fn parse_comments_end_to_end() {
        let data = br#"[
            {"id": 1, "content": "looks good"},
            {"id": 2, "comment": "legacy note", "author": "auditor"}
        ]"#;
        let comments = parse_comments(data).unwrap();
        assert_eq!(comments[0].content, "looks good");
        assert_eq!(comments[1].content, "legacy note");
        assert_eq!(comments[1].author, "auditor");
    }
}
