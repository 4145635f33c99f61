use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub entry_id: String,
    pub sentiment: String,
    pub summary: String,
    pub topics: Vec<String>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl AnalysisResponse {
    pub fn new(entry_id: &str, sentiment: &str, summary: &str, topics: Vec<String>) -> Self {
        Self {
            entry_id: String::from(entry_id),
            sentiment: String::from(sentiment),
            summary: String::from(summary),
            topics,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[test]
    fn test_new_sets_created_at() {
        let before = Utc::now();
        let response = AnalysisResponse::new(
            ENTRY_ID,
            "positive",
            "The learner made progress.",
            vec![String::from("actix"), String::from("diesel")],
        );

        assert_eq!(response.entry_id, ENTRY_ID);
        assert_eq!(response.sentiment, "positive");
        assert_eq!(response.topics, vec!["actix", "diesel"]);
        assert!(response.created_at >= before);
    }

    #[test]
    fn test_deserialize_defaults_created_at() {
        let json = format!(
            r#"{{"entry_id": "{ENTRY_ID}", "sentiment": "neutral", "summary": "Steady", "topics": []}}"#
        );
        let response: AnalysisResponse = serde_json::from_str(&json).unwrap();

        assert!(response.topics.is_empty());
        assert!(response.created_at <= Utc::now());
    }

    #[test]
    fn test_deserialize_preserves_topic_order() {
        let json = format!(
            r#"{{"entry_id": "{ENTRY_ID}", "sentiment": "positive", "summary": "s", "topics": ["c", "a", "b"]}}"#
        );
        let response: AnalysisResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(response.topics, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_deserialize_rejects_missing_fields() {
        let json = format!(r#"{{"entry_id": "{ENTRY_ID}", "sentiment": "positive"}}"#);
        assert!(serde_json::from_str::<AnalysisResponse>(&json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_non_list_topics() {
        let json = format!(
            r#"{{"entry_id": "{ENTRY_ID}", "sentiment": "positive", "summary": "s", "topics": "not a list"}}"#
        );
        assert!(serde_json::from_str::<AnalysisResponse>(&json).is_err());
    }
}
