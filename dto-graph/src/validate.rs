//! Structural validation of a parsed snapshot.

use std::collections::HashSet;

use dtogen_core::is_valid_identifier;
use miette::SourceSpan;

use crate::{Result, SymbolGraph, TypeGraph, TypeSymbol, error::SourceContext};

/// Check identifiers and reject duplicate qualified type names.
pub(crate) fn validate_types(types: &[TypeSymbol], ctx: &SourceContext) -> Result<()> {
    let mut seen = HashSet::new();

    for (position, ty) in types.iter().enumerate() {
        if !is_valid_identifier(&ty.name) {
            return Err(ctx.invalid_identifier_error(
                &ty.name,
                "type",
                find_name_span(ctx.src(), &ty.name, 0),
            ));
        }

        if !ty.namespace.is_empty()
            && !ty.namespace.split('.').all(is_valid_identifier)
        {
            return Err(ctx.invalid_identifier_error(
                &ty.namespace,
                "namespace",
                find_quoted_span(ctx.src(), &ty.namespace),
            ));
        }

        for member in &ty.members {
            if !is_valid_identifier(&member.name) {
                return Err(ctx.invalid_identifier_error(
                    &member.name,
                    format!("member in '{}'", ty.name),
                    find_name_span(ctx.src(), &member.name, 0),
                ));
            }
        }

        let qualified = ty.qualified_name();
        if seen.contains(&qualified) {
            // Point at this declaration rather than the first one.
            let occurrence = types[..position]
                .iter()
                .filter(|t| t.name == ty.name)
                .count();
            return Err(ctx.duplicate_type_error(
                qualified,
                find_name_span(ctx.src(), &ty.name, occurrence),
            ));
        }
        seen.insert(qualified);
    }

    Ok(())
}

/// Reject base-type chains that loop back on themselves.
pub(crate) fn validate_inheritance(graph: &TypeGraph, ctx: &SourceContext) -> Result<()> {
    for ty in graph.types() {
        let mut visited = HashSet::new();
        visited.insert(ty.qualified_name());

        let mut current = graph.base_type(ty);
        while let Some(base) = current {
            if !visited.insert(base.qualified_name()) {
                return Err(ctx.inheritance_cycle_error(
                    ty.qualified_name(),
                    find_name_span(ctx.src(), &ty.name, 0),
                ));
            }
            current = graph.base_type(base);
        }
    }

    Ok(())
}

/// Find the span of the `occurrence`-th `name = "<value>"` entry in the source.
///
/// Falls back to the first quoted occurrence of the value anywhere.
pub(crate) fn find_name_span(src: &str, value: &str, occurrence: usize) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", value);

    let mut declarations = src.match_indices(&quoted).filter(|(pos, _)| {
        let line_start = src[..*pos].rfind('\n').map_or(0, |i| i + 1);
        let prefix = src[line_start..*pos].trim();
        prefix == "name =" || prefix == "name="
    });

    if let Some((pos, _)) = declarations.nth(occurrence) {
        return Some(SourceSpan::from((pos + 1, value.len())));
    }

    find_quoted_span(src, value)
}

fn find_quoted_span(src: &str, value: &str) -> Option<SourceSpan> {
    src.find(&format!("\"{}\"", value))
        .map(|pos| SourceSpan::from((pos + 1, value.len())))
}
