//! Snapshot parsing from files and strings.

use std::str::FromStr;

use serde::Deserialize;

use crate::{
    Error, GeneratorOptions, Result, TypeGraph, TypeSymbol,
    error::SourceContext,
    validate::{validate_inheritance, validate_types},
};

/// Root of a snapshot document.
#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    options: GeneratorOptions,

    #[serde(default)]
    types: Vec<TypeSymbol>,
}

impl FromStr for TypeGraph {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_snapshot(s, "dtogen.toml")
    }
}

impl TypeGraph {
    /// Parse a snapshot from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_snapshot(content, filename)
    }
}

/// Parse and validate a snapshot with the given filename for error reporting.
pub fn parse_snapshot(content: &str, filename: &str) -> Result<TypeGraph> {
    let source_ctx = SourceContext::new(content, filename);
    let raw: RawSnapshot = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;

    validate_types(&raw.types, &source_ctx)?;
    let graph = TypeGraph::new(raw.options, raw.types);
    validate_inheritance(&graph, &source_ctx)?;

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Accessibility, SymbolGraph};

    #[test]
    fn test_parse_minimal_snapshot() {
        let graph: TypeGraph = r#"
            [[types]]
            name = "User"
            namespace = "App.Models"

            [[types.members]]
            name = "Id"
            type = "int"
            accessibility = "public"
        "#
        .parse()
        .unwrap();

        let user = graph.lookup("App.Models.User").unwrap();
        assert_eq!(user.accessibility, Accessibility::Internal);
        assert_eq!(user.members.len(), 1);
        assert_eq!(graph.options(), &GeneratorOptions::default());
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = "[[types]]\nname = 42\n".parse::<TypeGraph>().unwrap_err();
        match *err {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let err = r#"
            [[types]]
            name = "User"
            namespace = "App"

            [[types]]
            name = "User"
            namespace = "App"
        "#
        .parse::<TypeGraph>()
        .unwrap_err();

        assert!(matches!(*err, Error::DuplicateType { ref name, .. } if name == "App.User"));
    }

    #[test]
    fn test_same_name_in_other_namespace_allowed() {
        let graph: TypeGraph = r#"
            [[types]]
            name = "User"
            namespace = "App.Admin"

            [[types]]
            name = "User"
            namespace = "App.Shop"
        "#
        .parse()
        .unwrap();

        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_inheritance_cycle_rejected() {
        let err = r#"
            [[types]]
            name = "A"
            base = "B"

            [[types]]
            name = "B"
            base = "A"
        "#
        .parse::<TypeGraph>()
        .unwrap_err();

        assert!(matches!(*err, Error::InheritanceCycle { .. }));
    }

    #[test]
    fn test_invalid_member_name_rejected() {
        let err = r#"
            [[types]]
            name = "User"

            [[types.members]]
            name = "first-name"
            type = "string"
        "#
        .parse::<TypeGraph>()
        .unwrap_err();

        assert!(
            matches!(*err, Error::InvalidIdentifier { ref context, .. } if context == "member in 'User'")
        );
    }
}
