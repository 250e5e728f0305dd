//! Type selection step.

use super::ValidationContext;
use crate::errors::{fields, ValidationErrors};

pub(super) fn validate(context: &ValidationContext) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match context.selected_type {
        None => errors.add(fields::TYPE, "Identity type is required"),
        Some(identity_type) if !identity_type.is_creatable() => errors.add(
            fields::TYPE,
            format!("{} identities cannot be created as subidentities", identity_type),
        ),
        Some(_) => {
            if let Some(actor) = &context.actor {
                if !actor.can_create_subidentities() {
                    errors.add(
                        fields::TYPE,
                        format!("{} identities cannot create subidentities", actor.identity_type),
                    );
                }
            }
        }
    }

    errors
}
