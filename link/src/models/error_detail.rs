use serde::{Deserialize, Serialize};

/// Error body returned by the control API on non-success responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Short error summary
    #[serde(default)]
    pub error: Option<String>,

    /// HTTP status echoed in the body
    #[serde(default)]
    pub status: Option<i64>,

    /// Human-readable error message
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorDetail {
    /// The most descriptive detail string available, if any.
    pub fn detail(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_message_over_error() {
        let detail: ErrorDetail = serde_json::from_str(
            r#"{"error": "Template not found", "status": 404,
                "message": "Template with ID 999 does not exist"}"#,
        )
        .unwrap();
        assert_eq!(detail.detail(), Some("Template with ID 999 does not exist"));
    }

    #[test]
    fn test_falls_back_to_error_field() {
        let detail: ErrorDetail =
            serde_json::from_str(r#"{"error": "Template not found"}"#).unwrap();
        assert_eq!(detail.detail(), Some("Template not found"));
    }

    #[test]
    fn test_empty_body_has_no_detail() {
        let detail: ErrorDetail = serde_json::from_str("{}").unwrap();
        assert!(detail.detail().is_none());
    }
}
