use serde::{Deserialize, Serialize};

/// Request payload for launching a task from a template.
///
/// # Examples
///
/// ```rust
/// use semaphore_link::TaskRequest;
///
/// // Launch with defaults
/// let request = TaskRequest::new(44);
///
/// // Launch with an extra environment
/// let request = TaskRequest::new(44).with_environment(r#"{"DEPLOY_TAG":"v1.2"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Template to instantiate
    pub template_id: i64,

    /// Run the task in debug mode
    pub debug: bool,

    /// Perform a dry run only
    pub dry_run: bool,

    /// JSON-encoded extra environment for the task ("{}" for none)
    pub environment: String,
}

impl TaskRequest {
    /// Create a launch request for `template_id` with default options.
    pub fn new(template_id: i64) -> Self {
        Self {
            template_id,
            debug: false,
            dry_run: false,
            environment: "{}".to_string(),
        }
    }

    /// Replace the JSON-encoded environment passed to the task.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = TaskRequest::new(44);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "template_id": 44,
                "debug": false,
                "dry_run": false,
                "environment": "{}"
            })
        );
    }

    #[test]
    fn test_environment_override() {
        let request = TaskRequest::new(29).with_environment(r#"{"TAG":"beta"}"#);
        assert_eq!(request.environment, r#"{"TAG":"beta"}"#);
        assert_eq!(request.template_id, 29);
    }
}
