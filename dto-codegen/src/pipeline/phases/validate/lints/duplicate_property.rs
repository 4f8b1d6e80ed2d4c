//! Lint for repeated property names within one target type.

use std::collections::HashSet;

use super::super::Lint;
use crate::{descriptor::ClassDescriptor, pipeline::Diagnostic};

/// Lint that errors when a target type would declare a property twice.
///
/// Happens when a rename lands on another member's name, or when a virtual
/// property reuses a plain property's name.
pub struct DuplicatePropertyLint;

impl Lint for DuplicatePropertyLint {
    fn name(&self) -> &'static str {
        "duplicate-property"
    }

    fn description(&self) -> &'static str {
        "Detect repeated property names within a target type"
    }

    fn check(&self, descriptors: &[ClassDescriptor], diagnostics: &mut Vec<Diagnostic>) {
        for descriptor in descriptors {
            let mut seen = HashSet::new();
            let mut reported = HashSet::new();

            for property in &descriptor.properties {
                let name = property.target_name.as_str();
                if !seen.insert(name) && reported.insert(name) {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "property '{}' is declared more than once in '{}'",
                                name, descriptor.target_type_name
                            ),
                        )
                        .at(format!("{}.{}", descriptor.qualified_source_name(), name)),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PropertyDescriptor;
    use crate::pipeline::phases::validate::lints::fixtures::{descriptor, with_properties};

    #[test]
    fn test_unique_properties() {
        let descriptors = vec![with_properties(
            descriptor("App", "User", "UserDto"),
            &["Id", "Name"],
        )];

        let mut diagnostics = Vec::new();
        DuplicatePropertyLint.check(&descriptors, &mut diagnostics);

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_rename_collision_reported_once() {
        let mut user = with_properties(descriptor("App", "User", "UserDto"), &["Email"]);
        user.properties.push(PropertyDescriptor::plain("Mail", "Email", "string"));
        user.properties.push(PropertyDescriptor::computed("Email", "string", "entity.Mail"));

        let mut diagnostics = Vec::new();
        DuplicatePropertyLint.check(&[user], &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "property 'Email' is declared more than once in 'UserDto'"
        );
        assert_eq!(diagnostics[0].location.as_deref(), Some("App.User.Email"));
    }
}
