//! The queryable symbol graph.

use std::collections::HashMap;

use crate::{GeneratorOptions, TypeSymbol};

/// Read-only view of the host's symbol/type graph.
///
/// Candidate types are lowered in parallel against one shared graph.
pub trait SymbolGraph: Sync {
    /// All types in declaration order.
    fn types(&self) -> &[TypeSymbol];

    /// Find a type by its namespace-qualified name.
    fn lookup(&self, qualified_name: &str) -> Option<&TypeSymbol>;

    /// Resolve a type reference as written on `from`.
    ///
    /// A `global::` prefix makes the reference absolute. Otherwise it is
    /// tried relative to `from`'s namespace and each of its enclosing
    /// namespaces, innermost first, then as written.
    fn resolve(&self, from: &TypeSymbol, reference: &str) -> Option<&TypeSymbol> {
        if let Some(absolute) = reference.strip_prefix("global::") {
            return self.lookup(absolute);
        }

        let mut namespace = from.namespace.as_str();
        while !namespace.is_empty() {
            if let Some(found) = self.lookup(&format!("{}.{}", namespace, reference)) {
                return Some(found);
            }
            namespace = match namespace.rfind('.') {
                Some(pos) => &namespace[..pos],
                None => "",
            };
        }

        self.lookup(reference)
    }

    /// The resolved base type, or `None` when there is none or it lies
    /// outside the graph.
    fn base_type(&self, ty: &TypeSymbol) -> Option<&TypeSymbol> {
        ty.base
            .as_deref()
            .and_then(|reference| self.resolve(ty, reference))
    }

    /// Directly implemented interfaces that resolve inside the graph.
    fn interfaces(&self, ty: &TypeSymbol) -> Vec<&TypeSymbol> {
        ty.interfaces
            .iter()
            .filter_map(|reference| self.resolve(ty, reference))
            .collect()
    }
}

/// In-memory symbol graph built from a snapshot.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    options: GeneratorOptions,
    types: Vec<TypeSymbol>,
    index: HashMap<String, usize>,
}

impl TypeGraph {
    /// Build a graph from types in declaration order.
    ///
    /// When two types share a qualified name the first one wins lookups;
    /// snapshot parsing rejects such input before it gets here.
    pub fn new(options: GeneratorOptions, types: Vec<TypeSymbol>) -> Self {
        let mut index = HashMap::with_capacity(types.len());
        for (position, ty) in types.iter().enumerate() {
            index.entry(ty.qualified_name()).or_insert(position);
        }
        Self {
            options,
            types,
            index,
        }
    }

    /// Build a graph with default options.
    pub fn from_types(types: Vec<TypeSymbol>) -> Self {
        Self::new(GeneratorOptions::default(), types)
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl SymbolGraph for TypeGraph {
    fn types(&self) -> &[TypeSymbol] {
        &self.types
    }

    fn lookup(&self, qualified_name: &str) -> Option<&TypeSymbol> {
        self.index.get(qualified_name).map(|&i| &self.types[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> TypeGraph {
        TypeGraph::from_types(vec![
            TypeSymbol::class("App", "Entity"),
            TypeSymbol::class("App.Models", "User")
                .with_base("Entity")
                .with_interface("IAudited")
                .with_interface("System.IDisposable"),
            TypeSymbol::interface("App.Models", "IAudited"),
            TypeSymbol::class("", "Loose").with_base("global::App.Entity"),
        ])
    }

    #[test]
    fn test_lookup_by_qualified_name() {
        let graph = graph();
        assert!(graph.lookup("App.Models.User").is_some());
        assert!(graph.lookup("User").is_none());
        assert!(graph.lookup("Loose").is_some());
    }

    #[test]
    fn test_resolve_walks_enclosing_namespaces() {
        let graph = graph();
        let user = graph.lookup("App.Models.User").unwrap();

        let base = graph.base_type(user).unwrap();
        assert_eq!(base.qualified_name(), "App.Entity");
    }

    #[test]
    fn test_resolve_global_prefix() {
        let graph = graph();
        let loose = graph.lookup("Loose").unwrap();
        assert_eq!(graph.base_type(loose).unwrap().name, "Entity");
    }

    #[test]
    fn test_interfaces_skip_external_types() {
        let graph = graph();
        let user = graph.lookup("App.Models.User").unwrap();

        let interfaces = graph.interfaces(user);
        assert_eq!(interfaces.len(), 1);
        assert_eq!(interfaces[0].name, "IAudited");
    }

    #[test]
    fn test_first_duplicate_wins() {
        let graph = TypeGraph::from_types(vec![
            TypeSymbol::class("App", "User").with_base("First"),
            TypeSymbol::class("App", "User").with_base("Second"),
        ]);
        assert_eq!(
            graph.lookup("App.User").unwrap().base.as_deref(),
            Some("First")
        );
    }
}
