//! Configuration for the subidentity wizard.

use serde::{Deserialize, Serialize};

/// Wizard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Field limits and patterns
    pub limits: ValidationLimits,
    /// Also require approved KYC at the governance step for KYC-required types
    pub kyc_gates_governance: bool,
    /// Record submission attempts in the audit log
    pub audit_enabled: bool,
    /// Maximum audit entries kept
    pub max_audit_entries: usize,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            limits: ValidationLimits::default(),
            kyc_gates_governance: false,
            audit_enabled: true,
            max_audit_entries: 1000,
        }
    }
}

impl WizardConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Field limits used by the step validators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    /// Minimum trimmed name length (chars)
    pub name_min: usize,
    /// Maximum trimmed name length (chars)
    pub name_max: usize,
    /// Allowed name characters; length is bounded by `name_min`/`name_max`
    pub name_pattern: String,
    /// Maximum description length (chars)
    pub description_max: usize,
    /// Maximum number of tags
    pub tags_max: usize,
    /// Guardian email shape
    pub email_pattern: String,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            name_min: 2,
            name_max: 50,
            name_pattern: r"^[A-Za-z0-9 _.\-]+$".to_string(),
            description_max: 500,
            tags_max: 10,
            email_pattern: r"^[^\s@]+@[^\s@]+\.[^\s@]+$".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WizardConfig::default();
        assert_eq!(config.limits.name_min, 2);
        assert_eq!(config.limits.name_max, 50);
        assert_eq!(config.limits.tags_max, 10);
        assert!(!config.kyc_gates_governance);
        assert!(config.audit_enabled);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = WizardConfig::default();
        config.kyc_gates_governance = true;
        let yaml = config.to_yaml().unwrap();
        let parsed = WizardConfig::from_yaml(&yaml).unwrap();
        assert!(parsed.kyc_gates_governance);
        assert_eq!(parsed.limits.email_pattern, config.limits.email_pattern);
    }

    #[test]
    fn test_partial_limits() {
        let yaml = r#"
limits:
  description_max: 200
kyc_gates_governance: false
audit_enabled: false
max_audit_entries: 10
"#;
        let config = WizardConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.limits.description_max, 200);
        assert_eq!(config.limits.name_max, 50);
        assert!(!config.audit_enabled);
    }
}
