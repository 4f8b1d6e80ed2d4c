//! Lint for target types without properties.

use super::super::Lint;
use crate::{descriptor::ClassDescriptor, pipeline::Diagnostic};

/// Lint that warns when a target type ends up with no properties.
pub struct EmptyTransferLint;

impl Lint for EmptyTransferLint {
    fn name(&self) -> &'static str {
        "empty-transfer"
    }

    fn description(&self) -> &'static str {
        "Warn about target types with no properties"
    }

    fn check(&self, descriptors: &[ClassDescriptor], diagnostics: &mut Vec<Diagnostic>) {
        for descriptor in descriptors.iter().filter(|d| d.properties.is_empty()) {
            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    format!("'{}' has no properties", descriptor.target_type_name),
                )
                .at(descriptor.qualified_source_name()),
            );
        }
    }
}
