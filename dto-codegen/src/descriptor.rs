//! Descriptors handed from the resolvers to a language emitter.

use serde::Serialize;

/// Default suffix appended to the source type name.
pub const DEFAULT_SUFFIX: &str = "Dto";

/// Generation settings for one source type, read from its `GenerateDto`
/// marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    /// Appended to the source type name to form the target type name.
    pub suffix: String,
    /// Emit `FromEntity`/`ToEntity` and the hook call sites.
    pub generate_mapper: bool,
    /// Declare the hook interface instead of emitting optional hook stubs.
    pub enforce_hooks: bool,
    /// Reuse the source type's accessibility for the target type.
    pub use_source_access_modifier: bool,
    /// Also collect properties from base types and implemented interfaces.
    pub include_base_properties: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            generate_mapper: true,
            enforce_hooks: false,
            use_source_access_modifier: false,
            include_base_properties: false,
        }
    }
}

/// One property of the transfer type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    /// Source member name; `None` for virtual properties.
    pub original_name: Option<String>,
    pub target_name: String,
    pub type_name: String,
    pub is_required: bool,
    pub is_virtual: bool,
    /// Value expression in terms of `entity`; only set for virtual properties.
    pub value_expression: Option<String>,
    /// Whether `ToEntity` can assign the source member.
    pub write_back: bool,
}

impl PropertyDescriptor {
    /// A property mirrored from a source member.
    pub fn plain(
        original_name: impl Into<String>,
        target_name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            original_name: Some(original_name.into()),
            target_name: target_name.into(),
            type_name: type_name.into(),
            is_required: false,
            is_virtual: false,
            value_expression: None,
            write_back: true,
        }
    }

    /// A computed property. Never written back.
    pub fn computed(
        target_name: impl Into<String>,
        type_name: impl Into<String>,
        value_expression: impl Into<String>,
    ) -> Self {
        Self {
            original_name: None,
            target_name: target_name.into(),
            type_name: type_name.into(),
            is_required: false,
            is_virtual: true,
            value_expression: Some(value_expression.into()),
            write_back: false,
        }
    }

    pub fn required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    pub fn write_back(mut self, write_back: bool) -> Self {
        self.write_back = write_back && !self.is_virtual;
        self
    }

    /// Source member to read from, for plain properties.
    pub fn source_member(&self) -> Option<&str> {
        self.original_name.as_deref()
    }
}

/// Everything an emitter needs to render one transfer type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDescriptor {
    /// Namespace of the source type; empty for the global namespace.
    pub source_namespace: String,
    pub source_type_name: String,
    pub target_access_modifier: String,
    pub target_type_name: String,
    pub configuration: Configuration,
    /// Plain properties in resolution order, then virtual properties in
    /// marker order.
    pub properties: Vec<PropertyDescriptor>,
}

impl ClassDescriptor {
    /// Namespace-qualified target type name.
    pub fn qualified_target_name(&self) -> String {
        dtogen_core::qualified_name(&self.source_namespace, &self.target_type_name)
    }

    /// Namespace-qualified source type name.
    pub fn qualified_source_name(&self) -> String {
        dtogen_core::qualified_name(&self.source_namespace, &self.source_type_name)
    }

    pub fn plain_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| !p.is_virtual)
    }

    pub fn virtual_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.is_virtual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_defaults() {
        let config = Configuration::default();
        assert_eq!(config.suffix, "Dto");
        assert!(config.generate_mapper);
        assert!(!config.enforce_hooks);
        assert!(!config.use_source_access_modifier);
        assert!(!config.include_base_properties);
    }

    #[test]
    fn test_virtual_never_writes_back() {
        let prop = PropertyDescriptor::computed("FullName", "string", "entity.Name").write_back(true);
        assert!(!prop.write_back);
        assert_eq!(prop.source_member(), None);
    }

    #[test]
    fn test_descriptor_serializes() {
        let descriptor = ClassDescriptor {
            source_namespace: "App".into(),
            source_type_name: "User".into(),
            target_access_modifier: "public".into(),
            target_type_name: "UserDto".into(),
            configuration: Configuration::default(),
            properties: vec![PropertyDescriptor::plain("Id", "Id", "int")],
        };

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["target_type_name"], "UserDto");
        assert_eq!(json["properties"][0]["original_name"], "Id");
        assert_eq!(json["configuration"]["suffix"], "Dto");
        assert_eq!(descriptor.qualified_target_name(), "App.UserDto");
    }
}
