use serde::{Deserialize, Serialize};

/// Configuration for the feedback_mgt module (`modules.feedback_mgt` in the app config)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackMgtConfig {
    /// Page size used when a listing asks for `limit = 0`.
    #[serde(default = "default_search_limit")]
    pub default_search_limit: u64,
    /// Reject updates whose message is empty.
    #[serde(default = "default_require_message_on_update")]
    pub require_message_on_update: bool,
}

impl Default for FeedbackMgtConfig {
    fn default() -> Self {
        Self {
            default_search_limit: default_search_limit(),
            require_message_on_update: default_require_message_on_update(),
        }
    }
}

fn default_search_limit() -> u64 {
    30
}

fn default_require_message_on_update() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: FeedbackMgtConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(cfg.default_search_limit, 30);
        assert!(cfg.require_message_on_update);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<FeedbackMgtConfig, _> =
            serde_json::from_value(serde_json::json!({ "defaultSearchLimit": 5 }));
        assert!(res.is_err());
    }
}
