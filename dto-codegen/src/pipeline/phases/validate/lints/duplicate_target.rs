//! Lint for colliding target types.

use std::collections::HashMap;

use super::super::Lint;
use crate::{descriptor::ClassDescriptor, pipeline::Diagnostic};

/// Lint that errors when two source types produce the same target type name.
///
/// Units are written to `<Target>.g.cs`, so the bare name is the key:
/// `App.User` and `App.Admin.User` would both emit `UserDto.g.cs`, and
/// `Order` with suffix `Dto` and `OrderD` with suffix `to` both emit `OrderDto`.
pub struct DuplicateTargetLint;

impl Lint for DuplicateTargetLint {
    fn name(&self) -> &'static str {
        "duplicate-target"
    }

    fn description(&self) -> &'static str {
        "Detect source types that generate the same target type"
    }

    fn check(&self, descriptors: &[ClassDescriptor], diagnostics: &mut Vec<Diagnostic>) {
        let mut seen: HashMap<String, String> = HashMap::new();

        for descriptor in descriptors {
            let source = descriptor.qualified_source_name();

            match seen.get(&descriptor.target_type_name) {
                Some(first) => diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "target type '{}' of '{}' conflicts with the one generated for '{}' ({}.g.cs)",
                            descriptor.qualified_target_name(),
                            source,
                            first,
                            descriptor.target_type_name
                        ),
                    )
                    .at(source),
                ),
                None => {
                    seen.insert(descriptor.target_type_name.clone(), source);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::phases::validate::lints::fixtures::descriptor;

    #[test]
    fn test_distinct_targets() {
        let descriptors = vec![
            descriptor("App", "User", "UserDto"),
            descriptor("App", "Order", "OrderDto"),
            descriptor("App.Admin", "User", "AdminUserDto"),
        ];

        let mut diagnostics = Vec::new();
        DuplicateTargetLint.check(&descriptors, &mut diagnostics);

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_colliding_targets() {
        let descriptors = vec![
            descriptor("App", "Order", "OrderDto"),
            descriptor("App", "OrderD", "OrderDto"),
        ];

        let mut diagnostics = Vec::new();
        DuplicateTargetLint.check(&descriptors, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_error());
        assert_eq!(
            diagnostics[0].message,
            "target type 'App.OrderDto' of 'App.OrderD' conflicts with the one generated for 'App.Order' (OrderDto.g.cs)"
        );
        assert_eq!(diagnostics[0].location.as_deref(), Some("App.OrderD"));
    }

    #[test]
    fn test_same_target_in_other_namespace_collides() {
        let descriptors = vec![
            descriptor("App", "User", "UserDto"),
            descriptor("App.Admin", "User", "UserDto"),
        ];

        let mut diagnostics = Vec::new();
        DuplicateTargetLint.check(&descriptors, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_error());
        assert_eq!(
            diagnostics[0].message,
            "target type 'App.Admin.UserDto' of 'App.Admin.User' conflicts with the one generated for 'App.User' (UserDto.g.cs)"
        );
        assert_eq!(diagnostics[0].location.as_deref(), Some("App.Admin.User"));
    }
}
