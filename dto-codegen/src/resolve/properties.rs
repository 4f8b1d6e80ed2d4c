//! Plain property resolution over the inheritance and interface graph.

use std::collections::HashSet;

use dtogen_graph::{MemberSymbol, SymbolGraph, TypeKind, TypeSymbol};

use crate::descriptor::PropertyDescriptor;
use crate::extract::{is_ignored, target_name};

/// Resolve the plain properties of `ty` in first-seen order.
///
/// Without `include_base` only members declared on `ty` are considered.
/// With it, the walk continues through each base type, most-derived first,
/// then through every implemented interface. A member is considered only
/// the first time its `(name, type)` pair is seen; the pair is claimed
/// before eligibility is checked, so an ignored or hidden override still
/// shadows the base declaration.
pub fn resolve_properties<G>(graph: &G, ty: &TypeSymbol, include_base: bool) -> Vec<PropertyDescriptor>
where
    G: SymbolGraph + ?Sized,
{
    let mut walk = Walk::default();
    walk.visit(ty);

    if include_base {
        let chain = base_chain(graph, ty);
        for base in &chain {
            walk.visit(base);
        }
        for interface in all_interfaces(graph, ty, &chain) {
            walk.visit(interface);
        }
    }

    walk.properties
}

#[derive(Default)]
struct Walk {
    seen: HashSet<(String, String)>,
    properties: Vec<PropertyDescriptor>,
}

impl Walk {
    fn visit(&mut self, owner: &TypeSymbol) {
        for member in owner.properties() {
            let key = (member.name.clone(), member.type_name.clone());
            if !self.seen.insert(key) {
                continue;
            }
            if !is_eligible(owner, member) {
                continue;
            }
            self.properties.push(
                PropertyDescriptor::plain(&member.name, target_name(member), &member.type_name)
                    .required(member.is_required)
                    .write_back(is_writable(owner, member)),
            );
        }
    }
}

/// Interface members are implicitly public; class members must be
/// publicly readable.
fn is_eligible(owner: &TypeSymbol, member: &MemberSymbol) -> bool {
    if is_ignored(member) || member.is_static {
        return false;
    }
    match owner.kind {
        TypeKind::Interface => member.get.effective(member.accessibility).is_some(),
        TypeKind::Class => member.is_publicly_readable(),
    }
}

fn is_writable(owner: &TypeSymbol, member: &MemberSymbol) -> bool {
    match owner.kind {
        TypeKind::Interface => member.set.effective(member.accessibility).is_some(),
        TypeKind::Class => member.is_publicly_writable(),
    }
}

/// Base types of `ty`, most-derived first. Stops at the first base outside
/// the graph and never revisits a type.
fn base_chain<'g, G>(graph: &'g G, ty: &TypeSymbol) -> Vec<&'g TypeSymbol>
where
    G: SymbolGraph + ?Sized,
{
    let mut visited = HashSet::from([ty.qualified_name()]);
    let mut chain = Vec::new();

    let mut current = graph.base_type(ty);
    while let Some(base) = current {
        if !visited.insert(base.qualified_name()) {
            break;
        }
        chain.push(base);
        current = graph.base_type(base);
    }

    chain
}

/// Every interface implemented by `ty` or its bases, including interfaces
/// inherited by other interfaces, each once, in first-seen order.
fn all_interfaces<'g, G>(graph: &'g G, ty: &'g TypeSymbol, chain: &[&'g TypeSymbol]) -> Vec<&'g TypeSymbol>
where
    G: SymbolGraph + ?Sized,
{
    let mut visited = HashSet::new();
    let mut out = Vec::new();

    for owner in std::iter::once(ty).chain(chain.iter().copied()) {
        for interface in graph.interfaces(owner) {
            collect_interface(graph, interface, &mut visited, &mut out);
        }
    }

    out
}

fn collect_interface<'g, G>(
    graph: &'g G,
    interface: &'g TypeSymbol,
    visited: &mut HashSet<String>,
    out: &mut Vec<&'g TypeSymbol>,
) where
    G: SymbolGraph + ?Sized,
{
    if !visited.insert(interface.qualified_name()) {
        return;
    }
    out.push(interface);
    for inherited in graph.interfaces(interface) {
        collect_interface(graph, inherited, visited, out);
    }
}

#[cfg(test)]
mod tests {
    use dtogen_graph::{Accessibility, Accessor, Marker, TypeGraph};

    use super::*;

    fn names(properties: &[PropertyDescriptor]) -> Vec<&str> {
        properties.iter().map(|p| p.target_name.as_str()).collect()
    }

    fn user() -> TypeSymbol {
        TypeSymbol::class("App.Models", "User")
            .with_member(MemberSymbol::property("Id", "int"))
            .with_member(MemberSymbol::property("FirstName", "string").with_required())
            .with_member(MemberSymbol::property("LastName", "string").with_required())
            .with_member(MemberSymbol::property("Email", "string?"))
            .with_member(
                MemberSymbol::property("Password", "string?").with_marker(Marker::new("DtoIgnore")),
            )
            .with_member(MemberSymbol::property("Age", "int"))
            .with_member(
                MemberSymbol::property("RealAgeExpression", "Expression<Func<User, int>>")
                    .with_static()
                    .with_body("a => a.Age + 10"),
            )
    }

    fn user1() -> TypeSymbol {
        TypeSymbol::class("App.Models", "User1")
            .with_base("User")
            .with_member(MemberSymbol::property("Department", "string?"))
    }

    #[test]
    fn test_own_members_only() {
        let graph = TypeGraph::from_types(vec![user(), user1()]);
        let user1 = graph.lookup("App.Models.User1").unwrap();

        let properties = resolve_properties(&graph, user1, false);
        assert_eq!(names(&properties), vec!["Department"]);
    }

    #[test]
    fn test_filters_ignored_static_and_hidden() {
        let ty = user().with_member(
            MemberSymbol::property("Internal", "int").with_accessibility(Accessibility::Internal),
        );
        let graph = TypeGraph::from_types(vec![ty.clone()]);

        let properties = resolve_properties(&graph, &ty, false);
        assert_eq!(
            names(&properties),
            vec!["Id", "FirstName", "LastName", "Email", "Age"]
        );
        assert!(properties[1].is_required);
        assert!(!properties[0].is_required);
    }

    #[test]
    fn test_derived_first_walk() {
        let graph = TypeGraph::from_types(vec![user(), user1()]);
        let user1 = graph.lookup("App.Models.User1").unwrap();

        let properties = resolve_properties(&graph, user1, true);
        assert_eq!(
            names(&properties),
            vec!["Department", "Id", "FirstName", "LastName", "Email", "Age"]
        );
        assert!(properties.iter().all(|p| !p.is_virtual));
    }

    #[test]
    fn test_override_shadows_base_even_when_ignored() {
        let base = TypeSymbol::class("App", "Base")
            .with_member(MemberSymbol::property("Name", "string"))
            .with_member(MemberSymbol::property("Code", "string"));
        let derived = TypeSymbol::class("App", "Derived")
            .with_base("Base")
            .with_member(MemberSymbol::property("Name", "string").with_marker(Marker::new("DtoIgnore")))
            .with_member(
                MemberSymbol::property("Code", "string").with_accessibility(Accessibility::Protected),
            );
        let graph = TypeGraph::from_types(vec![base, derived]);
        let derived = graph.lookup("App.Derived").unwrap();

        assert!(resolve_properties(&graph, derived, true).is_empty());
    }

    #[test]
    fn test_same_name_different_type_is_distinct() {
        let base = TypeSymbol::class("App", "Base").with_member(MemberSymbol::property("Value", "int"));
        let derived = TypeSymbol::class("App", "Derived")
            .with_base("Base")
            .with_member(MemberSymbol::property("Value", "string"));
        let graph = TypeGraph::from_types(vec![base, derived]);
        let derived = graph.lookup("App.Derived").unwrap();

        let properties = resolve_properties(&graph, derived, true);
        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].type_name, "string");
        assert_eq!(properties[1].type_name, "int");
    }

    #[test]
    fn test_interfaces_after_bases_each_once() {
        let named = TypeSymbol::interface("App", "INamed")
            .with_member(MemberSymbol::property("DisplayName", "string").with_set(Accessor::Present(false)));
        let audited = TypeSymbol::interface("App", "IAudited")
            .with_interface("INamed")
            .with_member(MemberSymbol::property("CreatedAt", "DateTime"));
        let base = TypeSymbol::class("App", "Base")
            .with_interface("INamed")
            .with_member(MemberSymbol::property("Id", "int"));
        let derived = TypeSymbol::class("App", "Derived")
            .with_base("Base")
            .with_interface("IAudited")
            .with_interface("System.IDisposable")
            .with_member(MemberSymbol::property("Extra", "int"));
        let graph = TypeGraph::from_types(vec![named, audited, base, derived]);
        let derived = graph.lookup("App.Derived").unwrap();

        let properties = resolve_properties(&graph, derived, true);
        assert_eq!(
            names(&properties),
            vec!["Extra", "Id", "CreatedAt", "DisplayName"]
        );
        assert!(!properties[3].write_back);
    }

    #[test]
    fn test_implemented_interface_member_not_repeated() {
        let named = TypeSymbol::interface("App", "INamed")
            .with_member(MemberSymbol::property("Name", "string"));
        let ty = TypeSymbol::class("App", "Person")
            .with_interface("INamed")
            .with_member(MemberSymbol::property("Name", "string"));
        let graph = TypeGraph::from_types(vec![named, ty]);
        let person = graph.lookup("App.Person").unwrap();

        assert_eq!(names(&resolve_properties(&graph, person, true)), vec!["Name"]);
    }

    #[test]
    fn test_rename_and_write_back() {
        let ty = TypeSymbol::class("App", "Account")
            .with_member(MemberSymbol::property("Mail", "string").with_marker(Marker::new("DtoName").arg("Email")))
            .with_member(
                MemberSymbol::property("Name", "string")
                    .with_set(Accessor::Restricted(Accessibility::Private)),
            );
        let graph = TypeGraph::from_types(vec![ty.clone()]);

        let properties = resolve_properties(&graph, &ty, false);
        assert_eq!(properties[0].target_name, "Email");
        assert_eq!(properties[0].source_member(), Some("Mail"));
        assert!(properties[0].write_back);
        assert!(!properties[1].write_back);
    }

    #[test]
    fn test_base_outside_graph_ends_walk() {
        let ty = TypeSymbol::class("App", "Thing")
            .with_base("object")
            .with_member(MemberSymbol::property("Id", "int"));
        let graph = TypeGraph::from_types(vec![ty.clone()]);

        assert_eq!(names(&resolve_properties(&graph, &ty, true)), vec!["Id"]);
    }
}
