//! Lower phase - resolves candidate types into class descriptors.
//!
//! Every type is resolved independently against the shared, read-only
//! graph, so the work is spread over the rayon pool. Results are collected
//! in graph order.

use dtogen_graph::{SymbolGraph, TypeKind, TypeSymbol};
use eyre::Result;
use rayon::prelude::*;

use crate::{
    extract::GENERATE_DTO,
    pipeline::{CompilationContext, Diagnostic, Phase},
    resolve::{Resolution, describe_class},
};

/// Phase that turns every candidate type into a [`ClassDescriptor`].
///
/// Virtual properties that cannot be resolved are dropped and reported as
/// warnings; they never fail the phase.
///
/// [`ClassDescriptor`]: crate::descriptor::ClassDescriptor
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Resolve candidate types into class descriptors"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let graph = &ctx.graph;
        let resolutions: Vec<Resolution> = graph
            .types()
            .par_iter()
            .filter_map(|ty| describe_class(graph, ty))
            .collect();

        let mut diagnostics: Vec<Diagnostic> = graph
            .types()
            .iter()
            .filter(|ty| is_marked_interface(ty))
            .map(|ty| {
                let name = ty.qualified_name();
                tracing::warn!(interface = %name, "generation marker on interface ignored");
                Diagnostic::warning(
                    self.name(),
                    format!("interface '{}' cannot have a transfer type", name),
                )
                .at(name)
            })
            .collect();

        let mut descriptors = Vec::with_capacity(resolutions.len());
        for Resolution { descriptor, dropped } in resolutions {
            let source = descriptor.qualified_source_name();
            for property in dropped {
                tracing::warn!(
                    source = %source,
                    property = %property.name,
                    reason = %property.reason,
                    "virtual property dropped"
                );
                diagnostics.push(
                    Diagnostic::warning(
                        self.name(),
                        format!(
                            "virtual property '{}' dropped: {}",
                            property.name, property.reason
                        ),
                    )
                    .at(format!("{}.{}", source, property.name)),
                );
            }
            descriptors.push(descriptor);
        }

        tracing::debug!(count = descriptors.len(), "lowered transfer types");
        ctx.diagnostics.extend(diagnostics);
        ctx.descriptors = Some(descriptors);
        Ok(())
    }
}

fn is_marked_interface(ty: &TypeSymbol) -> bool {
    ty.kind == TypeKind::Interface && ty.markers.iter().any(|m| m.is(GENERATE_DTO))
}
