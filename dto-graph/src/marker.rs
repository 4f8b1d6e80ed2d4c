//! Declarative markers (attributes) attached to types and members.

use indexmap::IndexMap;
use serde::Deserialize;

/// A declarative marker as exported by the host, e.g.
/// `[GenerateDto("Model", EnforceHooks = true)]`.
///
/// Positional arguments keep their declaration order; named arguments are
/// looked up by key and never depend on order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Marker {
    /// Marker name, with or without the `Attribute` suffix and namespace.
    pub name: String,

    /// Positional (constructor) arguments.
    #[serde(default)]
    pub args: Vec<MarkerValue>,

    /// Named (property) arguments.
    #[serde(default)]
    pub named: IndexMap<String, MarkerValue>,
}

impl Marker {
    /// Create a marker with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            named: IndexMap::new(),
        }
    }

    /// Add a positional argument.
    pub fn arg(mut self, value: impl Into<MarkerValue>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Add a named argument.
    pub fn named_arg(mut self, key: impl Into<String>, value: impl Into<MarkerValue>) -> Self {
        self.named.insert(key.into(), value.into());
        self
    }

    /// Check whether this marker is `name`.
    ///
    /// `DtoIgnore`, `DtoIgnoreAttribute` and `DtoGenerator.DtoIgnore` all
    /// match `is("DtoIgnore")`.
    pub fn is(&self, name: &str) -> bool {
        let simple = self
            .name
            .rsplit('.')
            .next()
            .unwrap_or(self.name.as_str());
        simple == name || simple.strip_suffix("Attribute") == Some(name)
    }

    /// Get a positional argument.
    pub fn positional(&self, index: usize) -> Option<&MarkerValue> {
        self.args.get(index)
    }

    /// Get a named argument.
    pub fn named(&self, key: &str) -> Option<&MarkerValue> {
        self.named.get(key)
    }
}

/// A marker argument value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MarkerValue {
    Bool(bool),
    Int(i64),
    Str(String),
    /// A `typeof(T)` argument, written `{ type = "T" }`.
    Type(TypeOf),
}

/// The payload of a `typeof(T)` marker argument.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeOf {
    /// Display name of the referenced type.
    #[serde(rename = "type")]
    pub name: String,
}

impl MarkerValue {
    /// Create a `typeof(T)` value.
    pub fn type_of(name: impl Into<String>) -> Self {
        Self::Type(TypeOf { name: name.into() })
    }

    /// Get the value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the referenced type name, if this is a `typeof(T)` value.
    pub fn as_type(&self) -> Option<&str> {
        match self {
            Self::Type(t) => Some(&t.name),
            _ => None,
        }
    }
}

impl From<bool> for MarkerValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MarkerValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for MarkerValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for MarkerValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}
