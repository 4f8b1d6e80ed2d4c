//! Type and member symbols exported by the host.

use std::fmt;

use dtogen_core::qualified_name;
use serde::Deserialize;

use crate::Marker;

/// Declared accessibility of a type, member or accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Accessibility {
    #[serde(rename = "public")]
    Public,
    #[serde(rename = "internal")]
    Internal,
    #[serde(rename = "protected")]
    Protected,
    #[serde(rename = "private")]
    Private,
    #[serde(rename = "protected internal")]
    ProtectedInternal,
    #[serde(rename = "private protected")]
    PrivateProtected,
}

impl Accessibility {
    /// The C# modifier keyword(s) for this accessibility.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::ProtectedInternal => "protected internal",
            Self::PrivateProtected => "private protected",
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A property accessor declaration.
///
/// `get = true` declares an accessor sharing the property's accessibility,
/// `set = false` declares none, and `set = "private"` restricts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Accessor {
    Present(bool),
    Restricted(Accessibility),
}

impl Accessor {
    /// Effective accessibility of the accessor, or `None` if it is absent.
    pub fn effective(&self, member: Accessibility) -> Option<Accessibility> {
        match self {
            Self::Present(true) => Some(member),
            Self::Present(false) => None,
            Self::Restricted(access) => Some(*access),
        }
    }
}

impl Default for Accessor {
    fn default() -> Self {
        Self::Present(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    #[default]
    Property,
    Method,
}

/// A named type in the host graph.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeSymbol {
    /// Simple type name (e.g. `User`).
    pub name: String,

    /// Containing namespace; empty for the global namespace.
    #[serde(default)]
    pub namespace: String,

    /// Declared accessibility (C# default for top-level types is `internal`).
    #[serde(default = "default_type_accessibility")]
    pub accessibility: Accessibility,

    #[serde(default)]
    pub kind: TypeKind,

    /// Base type reference, qualified or relative to this type's namespace.
    #[serde(default)]
    pub base: Option<String>,

    /// Directly implemented interfaces.
    #[serde(default)]
    pub interfaces: Vec<String>,

    #[serde(default)]
    pub markers: Vec<Marker>,

    /// Members in declaration order.
    #[serde(default)]
    pub members: Vec<MemberSymbol>,
}

fn default_type_accessibility() -> Accessibility {
    Accessibility::Internal
}

impl TypeSymbol {
    /// Create a public class in the given namespace.
    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            accessibility: Accessibility::Public,
            kind: TypeKind::Class,
            base: None,
            interfaces: Vec::new(),
            markers: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Create a public interface in the given namespace.
    pub fn interface(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Interface,
            ..Self::class(namespace, name)
        }
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_member(mut self, member: MemberSymbol) -> Self {
        self.members.push(member);
        self
    }

    /// Namespace-qualified name (e.g. `App.Models.User`).
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.namespace, &self.name)
    }

    /// All markers matching `name`.
    pub fn markers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Marker> + 'a {
        self.markers.iter().filter(move |m| m.is(name))
    }

    /// First member declared with the given name.
    pub fn member(&self, name: &str) -> Option<&MemberSymbol> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Property members in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &MemberSymbol> {
        self.members
            .iter()
            .filter(|m| m.kind == MemberKind::Property)
    }
}

/// A member (property or method) of a type.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberSymbol {
    pub name: String,

    /// Declared type display string (return type for methods).
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub kind: MemberKind,

    /// Declared accessibility (C# default for members is `private`).
    #[serde(default = "default_member_accessibility")]
    pub accessibility: Accessibility,

    #[serde(default, rename = "static")]
    pub is_static: bool,

    /// Required-initialization flag (`required` modifier).
    #[serde(default, rename = "required")]
    pub is_required: bool,

    #[serde(default)]
    pub get: Accessor,

    /// Setter (or `init` accessor).
    #[serde(default)]
    pub set: Accessor,

    /// Declaration body: a property's expression body or initializer, or a
    /// method's expression body or block body.
    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub markers: Vec<Marker>,
}

fn default_member_accessibility() -> Accessibility {
    Accessibility::Private
}

impl MemberSymbol {
    /// Create a public instance auto-property (`{ get; set; }`).
    pub fn property(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            kind: MemberKind::Property,
            accessibility: Accessibility::Public,
            is_static: false,
            is_required: false,
            get: Accessor::Present(true),
            set: Accessor::Present(true),
            body: None,
            markers: Vec::new(),
        }
    }

    /// Create a public instance method.
    pub fn method(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Method,
            get: Accessor::Present(false),
            set: Accessor::Present(false),
            ..Self::property(name, return_type)
        }
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn with_get(mut self, get: Accessor) -> Self {
        self.get = get;
        self
    }

    pub fn with_set(mut self, set: Accessor) -> Self {
        self.set = set;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// First marker matching `name`.
    pub fn marker(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.is(name))
    }

    pub fn has_marker(&self, name: &str) -> bool {
        self.marker(name).is_some()
    }

    /// Public, non-static and readable from outside the type.
    pub fn is_publicly_readable(&self) -> bool {
        self.kind == MemberKind::Property
            && self.accessibility.is_public()
            && !self.is_static
            && self
                .get
                .effective(self.accessibility)
                .is_some_and(|a| a.is_public())
    }

    /// Can be assigned in an object initializer from outside the type.
    pub fn is_publicly_writable(&self) -> bool {
        self.accessibility.is_public()
            && self
                .set
                .effective(self.accessibility)
                .is_some_and(|a| a.is_public())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_effective() {
        assert_eq!(
            Accessor::Present(true).effective(Accessibility::Public),
            Some(Accessibility::Public)
        );
        assert_eq!(Accessor::Present(false).effective(Accessibility::Public), None);
        assert_eq!(
            Accessor::Restricted(Accessibility::Private).effective(Accessibility::Public),
            Some(Accessibility::Private)
        );
    }

    #[test]
    fn test_readable_and_writable() {
        let plain = MemberSymbol::property("Id", "int");
        assert!(plain.is_publicly_readable());
        assert!(plain.is_publicly_writable());

        let private_set = MemberSymbol::property("Name", "string")
            .with_set(Accessor::Restricted(Accessibility::Private));
        assert!(private_set.is_publicly_readable());
        assert!(!private_set.is_publicly_writable());

        let write_only = MemberSymbol::property("Secret", "string").with_get(Accessor::Present(false));
        assert!(!write_only.is_publicly_readable());

        let stat = MemberSymbol::property("Count", "int").with_static();
        assert!(!stat.is_publicly_readable());

        let internal =
            MemberSymbol::property("Hidden", "int").with_accessibility(Accessibility::Internal);
        assert!(!internal.is_publicly_readable());

        assert!(!MemberSymbol::method("Compute", "int").is_publicly_readable());
    }

    #[test]
    fn test_member_deserialize_defaults() {
        let member: MemberSymbol = toml::from_str(
            r#"
            name = "Email"
            type = "string?"
            "#,
        )
        .unwrap();

        assert_eq!(member.kind, MemberKind::Property);
        assert_eq!(member.accessibility, Accessibility::Private);
        assert_eq!(member.get, Accessor::Present(true));
        assert!(!member.is_static);
        assert!(member.body.is_none());
    }

    #[test]
    fn test_accessibility_deserialize() {
        let member: MemberSymbol = toml::from_str(
            r#"
            name = "Email"
            type = "string"
            accessibility = "protected internal"
            set = "private"
            "#,
        )
        .unwrap();

        assert_eq!(member.accessibility, Accessibility::ProtectedInternal);
        assert_eq!(member.set, Accessor::Restricted(Accessibility::Private));
        assert_eq!(member.accessibility.to_string(), "protected internal");
    }
}
