//! Per-type resolution: markers and members to a [`ClassDescriptor`].

mod properties;
mod virtuals;

use dtogen_graph::{SymbolGraph, TypeKind, TypeSymbol};
pub use properties::resolve_properties;
pub use virtuals::{DropReason, DroppedProperty, resolve_member_expression, resolve_virtual_properties};

use crate::descriptor::ClassDescriptor;
use crate::extract::extract_configuration;

/// Outcome of resolving one candidate type.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub descriptor: ClassDescriptor,
    /// Virtual property declarations that were skipped.
    pub dropped: Vec<DroppedProperty>,
}

/// Build the descriptor for `ty`.
///
/// Returns `None` for interfaces and for types without the generation
/// marker. Plain properties come first, then virtual properties, which are
/// declared per type and never inherited.
pub fn describe_class<G>(graph: &G, ty: &TypeSymbol) -> Option<Resolution>
where
    G: SymbolGraph + ?Sized,
{
    if ty.kind != TypeKind::Class {
        return None;
    }
    let configuration = extract_configuration(&ty.markers)?;

    let mut properties = resolve_properties(graph, ty, configuration.include_base_properties);
    let (computed, dropped) = resolve_virtual_properties(ty);
    properties.extend(computed);

    let target_access_modifier = if configuration.use_source_access_modifier {
        ty.accessibility.keyword()
    } else {
        "public"
    };

    tracing::debug!(
        source = %ty.qualified_name(),
        properties = properties.len(),
        dropped = dropped.len(),
        "resolved transfer type"
    );

    Some(Resolution {
        descriptor: ClassDescriptor {
            source_namespace: ty.namespace.clone(),
            source_type_name: ty.name.clone(),
            target_access_modifier: target_access_modifier.to_string(),
            target_type_name: format!("{}{}", ty.name, configuration.suffix),
            configuration,
            properties,
        },
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use dtogen_graph::{Accessibility, Marker, MarkerValue, MemberSymbol, TypeGraph};

    use super::*;

    fn user() -> TypeSymbol {
        TypeSymbol::class("TestGenerator.Models", "User")
            .with_accessibility(Accessibility::Internal)
            .with_marker(
                Marker::new("GenerateDto")
                    .named_arg("EnforceHooks", true)
                    .named_arg("UseSourceAccessModifier", true),
            )
            .with_marker(
                Marker::new("DtoVirtualProperty")
                    .arg("FullName")
                    .arg(MarkerValue::type_of("string"))
                    .arg("entity.FirstName + \" \" + entity.LastName"),
            )
            .with_member(MemberSymbol::property("Id", "int"))
            .with_member(MemberSymbol::property("FirstName", "string").with_required())
            .with_member(MemberSymbol::property("LastName", "string").with_required())
    }

    fn user1() -> TypeSymbol {
        TypeSymbol::class("TestGenerator.Models", "User1")
            .with_base("User")
            .with_marker(Marker::new("GenerateDto").named_arg("IncludeBaseProperties", true))
            .with_member(MemberSymbol::property("Department", "string?"))
    }

    #[test]
    fn test_describe_user() {
        let graph = TypeGraph::from_types(vec![user()]);
        let resolution = describe_class(&graph, &graph.types()[0]).unwrap();
        let descriptor = resolution.descriptor;

        assert_eq!(descriptor.target_type_name, "UserDto");
        assert_eq!(descriptor.target_access_modifier, "internal");
        assert_eq!(descriptor.source_namespace, "TestGenerator.Models");
        assert!(descriptor.configuration.enforce_hooks);

        let names: Vec<_> = descriptor
            .properties
            .iter()
            .map(|p| p.target_name.as_str())
            .collect();
        assert_eq!(names, vec!["Id", "FirstName", "LastName", "FullName"]);
        assert!(descriptor.properties[3].is_virtual);
    }

    #[test]
    fn test_virtual_properties_not_inherited() {
        let graph = TypeGraph::from_types(vec![user(), user1()]);
        let resolution = describe_class(&graph, &graph.types()[1]).unwrap();
        let descriptor = resolution.descriptor;

        assert_eq!(descriptor.target_type_name, "User1Dto");
        assert_eq!(descriptor.target_access_modifier, "public");
        assert_eq!(descriptor.virtual_properties().count(), 0);
        assert_eq!(descriptor.plain_properties().count(), 4);
    }

    #[test]
    fn test_non_candidates_skipped() {
        let plain = TypeSymbol::class("App", "Plain");
        let interface = TypeSymbol::interface("App", "IUser").with_marker(Marker::new("GenerateDto"));
        let graph = TypeGraph::from_types(vec![plain, interface]);

        assert!(graph.types().iter().all(|ty| describe_class(&graph, ty).is_none()));
    }

    #[test]
    fn test_custom_suffix() {
        let ty = TypeSymbol::class("App", "Order").with_marker(Marker::new("GenerateDto").arg("Model"));
        let graph = TypeGraph::from_types(vec![ty]);

        let resolution = describe_class(&graph, &graph.types()[0]).unwrap();
        assert_eq!(resolution.descriptor.target_type_name, "OrderModel");
    }
}
