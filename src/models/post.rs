//! Publish-side models: media identifiers and post results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier returned by the media upload call
///
/// Passed through verbatim to the status post that follows it, never
/// stored or reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaId(pub String);

impl MediaId {
    /// The raw identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subset of the status-update response the caller cares about
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResult {
    /// Service-assigned status id
    #[serde(rename = "id_str")]
    pub id: String,
    /// Text as the service recorded it
    pub text: String,
    /// Creation timestamp, in the service's `created_at` format
    pub created_at: String,
}

impl PostResult {
    /// Parse the service timestamp, e.g. `Wed Aug 27 13:08:45 +0000 2008`
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_str(&self.created_at, "%a %b %d %H:%M:%S %z %Y")
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_post_result_from_wire() {
        let body = r#"{
            "id_str": "1050118621198921728",
            "text": "hello",
            "created_at": "Wed Aug 27 13:08:45 +0000 2008"
        }"#;

        let result: PostResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.id, "1050118621198921728");

        let stamp = result.created_at_utc().unwrap();
        assert_eq!(stamp.year(), 2008);
        assert_eq!(stamp.month(), 8);
    }

    #[test]
    fn test_created_at_parse_failure_is_none() {
        let result = PostResult {
            id: "1".to_string(),
            text: "hello".to_string(),
            created_at: "not a date".to_string(),
        };
        assert!(result.created_at_utc().is_none());
    }
}
