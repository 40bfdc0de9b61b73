//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Keep a user-entered option even when persisting it fails
    #[serde(default = "default_optimistic_add_option")]
    pub optimistic_add_option: bool,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            optimistic_add_option: default_optimistic_add_option(),
            log_json: false,
        }
    }
}

fn default_optimistic_add_option() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(flags.optimistic_add_option);
        assert!(!flags.log_json);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let json = r#"{
            "optimistic_add_option": false,
            "log_json": true
        }"#;

        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert!(!flags.optimistic_add_option);
        assert!(flags.log_json);
    }

    #[test]
    fn test_missing_flags_use_defaults() {
        let flags: FeatureFlags = serde_json::from_str("{}").unwrap();
        assert!(flags.optimistic_add_option);
    }
}
