//! Lint for names that are not usable as C# identifiers.

use dtogen_core::is_valid_identifier;

use super::super::Lint;
use crate::{descriptor::ClassDescriptor, pipeline::Diagnostic};

/// Lint that errors on target type or property names that are not valid
/// identifiers, such as a suffix containing `-` or a keyword rename.
pub struct InvalidTargetNameLint;

impl Lint for InvalidTargetNameLint {
    fn name(&self) -> &'static str {
        "invalid-target-name"
    }

    fn description(&self) -> &'static str {
        "Check generated type and property names are valid identifiers"
    }

    fn check(&self, descriptors: &[ClassDescriptor], diagnostics: &mut Vec<Diagnostic>) {
        for descriptor in descriptors {
            let source = descriptor.qualified_source_name();

            if !is_valid_identifier(&descriptor.target_type_name) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "target type name '{}' is not a valid identifier (check the suffix)",
                            descriptor.target_type_name
                        ),
                    )
                    .at(source.clone()),
                );
            }

            for property in &descriptor.properties {
                if !is_valid_identifier(&property.target_name) {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "property name '{}' is not a valid identifier",
                                property.target_name
                            ),
                        )
                        .at(format!(
                            "{}.{}",
                            source,
                            property.source_member().unwrap_or(property.target_name.as_str())
                        )),
                    );
                }
            }
        }
    }
}
