//! Basic info step: name, description, tags.

use regex::Regex;

use squid_identity::SubidentityMetadata;

use crate::config::ValidationLimits;
use crate::errors::{fields, ValidationErrors};

pub(super) fn validate(
    limits: &ValidationLimits,
    name_pattern: &Regex,
    metadata: &SubidentityMetadata,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let name = metadata.name.trim();
    let name_len = name.chars().count();
    if name.is_empty() {
        errors.add(fields::NAME, "Name is required");
    } else if name_len < limits.name_min {
        errors.add(
            fields::NAME,
            format!("Name must be at least {} characters", limits.name_min),
        );
    } else if name_len > limits.name_max {
        errors.add(
            fields::NAME,
            format!("Name must be at most {} characters", limits.name_max),
        );
    } else if !name_pattern.is_match(name) {
        errors.add(
            fields::NAME,
            "Name may only contain letters, numbers, spaces, underscores, periods and hyphens",
        );
    }

    if let Some(description) = &metadata.description {
        if description.chars().count() > limits.description_max {
            errors.add(
                fields::DESCRIPTION,
                format!("Description must be at most {} characters", limits.description_max),
            );
        }
    }

    if metadata.tags.len() > limits.tags_max {
        errors.add(
            fields::TAGS,
            format!("At most {} tags are allowed", limits.tags_max),
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(metadata: &SubidentityMetadata) -> ValidationErrors {
        let limits = ValidationLimits::default();
        let pattern = Regex::new(&limits.name_pattern).unwrap();
        validate(&limits, &pattern, metadata)
    }

    fn named(name: &str) -> SubidentityMetadata {
        SubidentityMetadata {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn name_message(errors: &ValidationErrors) -> String {
        errors.get(fields::NAME).unwrap()[0].clone()
    }

    #[test]
    fn test_name_required() {
        assert_eq!(name_message(&check(&named("   "))), "Name is required");
    }

    #[test]
    fn test_name_too_short() {
        assert!(name_message(&check(&named("a"))).contains("at least 2"));
    }

    #[test]
    fn test_name_too_long() {
        assert!(name_message(&check(&named(&"a".repeat(51)))).contains("at most 50"));
    }

    #[test]
    fn test_name_pattern() {
        assert!(name_message(&check(&named("bad@name!"))).contains("may only contain"));
    }

    #[test]
    fn test_name_is_trimmed() {
        assert!(check(&named("  My DAO_1.0-x  ")).is_empty());
    }

    #[test]
    fn test_description_and_tags_limits() {
        let metadata = SubidentityMetadata {
            name: "Valid Name".to_string(),
            description: Some("d".repeat(501)),
            tags: (0..11).map(|i| format!("tag{}", i)).collect(),
            ..Default::default()
        };
        let errors = check(&metadata);
        assert!(errors.contains(fields::DESCRIPTION));
        assert!(errors.contains(fields::TAGS));
        assert!(!errors.contains(fields::NAME));
    }

    #[test]
    fn test_raised_name_max() {
        let limits = ValidationLimits {
            name_max: 60,
            ..Default::default()
        };
        let pattern = Regex::new(&limits.name_pattern).unwrap();

        assert!(validate(&limits, &pattern, &named(&"a".repeat(55))).is_empty());
        let errors = validate(&limits, &pattern, &named(&"a".repeat(61)));
        assert!(name_message(&errors).contains("at most 60"));
    }

    #[test]
    fn test_limits_are_inclusive() {
        let metadata = SubidentityMetadata {
            name: "a".repeat(50),
            description: Some("d".repeat(500)),
            tags: (0..10).map(|i| format!("tag{}", i)).collect(),
            ..Default::default()
        };
        assert!(check(&metadata).is_empty());
    }
}
