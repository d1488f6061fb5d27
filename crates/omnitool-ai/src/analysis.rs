//! Structured resume-analysis result.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// The model's scoring of a resume. Field names mirror the JSON schema
/// sent with the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(rename = "roleMatch")]
    pub role_match: String,
}

impl AnalysisReport {
    /// Report returned when the model's output is not parseable JSON.
    /// Callers get a usable record instead of a hard failure.
    pub fn fallback() -> Self {
        Self {
            score: 0.0,
            strengths: vec!["Error parsing analysis".to_owned()],
            weaknesses: vec!["AI response format was invalid".to_owned()],
            suggestions: vec!["Please try a shorter CV text".to_owned()],
            role_match: "N/A".to_owned(),
        }
    }

    /// JSON schema enforced on the model via `responseSchema`.
    pub(crate) fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "score": {
                    "type": "NUMBER",
                    "description": "Professional score from 0 to 100"
                },
                "strengths": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Top 3-5 professional assets"
                },
                "weaknesses": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Areas requiring optimization"
                },
                "suggestions": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Actionable steps to improve the CV"
                },
                "roleMatch": {
                    "type": "STRING",
                    "description": "The top 3 job titles this person should apply for"
                }
            },
            "required": ["score", "strengths", "weaknesses", "suggestions", "roleMatch"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_round_trips_role_match_key() {
        let raw = r#"{
            "score": 82,
            "strengths": ["clear impact statements"],
            "weaknesses": ["no metrics"],
            "suggestions": ["quantify outcomes"],
            "roleMatch": "Backend Engineer, SRE, Platform Engineer"
        }"#;
        let report: AnalysisReport = serde_json::from_str(raw).unwrap();
        assert_eq!(report.score, 82.0);
        assert_eq!(report.role_match, "Backend Engineer, SRE, Platform Engineer");

        let out = serde_json::to_value(&report).unwrap();
        assert!(out.get("roleMatch").is_some());
        assert!(out.get("role_match").is_none());
    }

    #[test]
    fn test_fallback_is_well_formed() {
        let report = AnalysisReport::fallback();
        assert_eq!(report.score, 0.0);
        assert_eq!(report.role_match, "N/A");
        assert!(!report.strengths.is_empty());
    }
}
