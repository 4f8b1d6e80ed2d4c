//! Lint for properties that clash with generated members.

use super::super::Lint;
use crate::{descriptor::ClassDescriptor, pipeline::Diagnostic};

/// Members every target type declares.
const ALWAYS_GENERATED: &[&str] = &["ToString"];
/// Members declared only when mapping is generated.
const MAPPER_GENERATED: &[&str] = &["FromEntity", "ToEntity", "OnDtoCreated", "OnEntityCreated"];

/// Lint that errors when a property would share a name with its enclosing
/// type or with a member the emitter generates.
pub struct MemberConflictLint;

impl Lint for MemberConflictLint {
    fn name(&self) -> &'static str {
        "member-conflict"
    }

    fn description(&self) -> &'static str {
        "Detect properties named like the target type or a generated member"
    }

    fn check(&self, descriptors: &[ClassDescriptor], diagnostics: &mut Vec<Diagnostic>) {
        for descriptor in descriptors {
            for property in &descriptor.properties {
                let name = property.target_name.trim_start_matches('@');

                let clash = if name == descriptor.target_type_name {
                    Some("its enclosing type")
                } else if ALWAYS_GENERATED.contains(&name)
                    || (descriptor.configuration.generate_mapper && MAPPER_GENERATED.contains(&name))
                {
                    Some("a generated member")
                } else {
                    None
                };

                if let Some(clash) = clash {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "property '{}' in '{}' has the same name as {}",
                                name, descriptor.target_type_name, clash
                            ),
                        )
                        .at(format!("{}.{}", descriptor.qualified_source_name(), name)),
                    );
                }
            }
        }
    }
}
