//! Attribute extractor: declarative markers to typed settings.
//!
//! Every lookup is by name, so marker argument order never matters, and
//! every malformed value falls back to its documented default.

use dtogen_graph::{Marker, MemberSymbol};

use crate::descriptor::{Configuration, DEFAULT_SUFFIX};

/// Primary marker; a type without it is not a candidate.
pub const GENERATE_DTO: &str = "GenerateDto";
/// Member marker renaming the transfer property.
pub const DTO_NAME: &str = "DtoName";
/// Member marker excluding a property.
pub const DTO_IGNORE: &str = "DtoIgnore";
/// Repeatable type marker declaring a computed property.
pub const DTO_VIRTUAL_PROPERTY: &str = "DtoVirtualProperty";
/// Named argument of [`DTO_VIRTUAL_PROPERTY`] referencing an expression member.
pub const EXPRESSION_MEMBER_NAME: &str = "ExpressionMemberName";

const GENERATE_MAPPER: &str = "GenerateMapper";
const ENFORCE_HOOKS: &str = "EnforceHooks";
const USE_SOURCE_ACCESS_MODIFIER: &str = "UseSourceAccessModifier";
const INCLUDE_BASE_PROPERTIES: &str = "IncludeBaseProperties";

/// Read the configuration from a type's markers.
///
/// Returns `None` when the type carries no [`GENERATE_DTO`] marker.
pub fn extract_configuration(markers: &[Marker]) -> Option<Configuration> {
    let marker = markers.iter().find(|m| m.is(GENERATE_DTO))?;
    let defaults = Configuration::default();

    let flag = |key: &str, default: bool| {
        marker
            .named(key)
            .and_then(|value| value.as_bool())
            .unwrap_or(default)
    };

    let suffix = marker
        .positional(0)
        .and_then(|value| value.as_str())
        .unwrap_or(DEFAULT_SUFFIX)
        .to_string();

    Some(Configuration {
        suffix,
        generate_mapper: flag(GENERATE_MAPPER, defaults.generate_mapper),
        enforce_hooks: flag(ENFORCE_HOOKS, defaults.enforce_hooks),
        use_source_access_modifier: flag(
            USE_SOURCE_ACCESS_MODIFIER,
            defaults.use_source_access_modifier,
        ),
        include_base_properties: flag(INCLUDE_BASE_PROPERTIES, defaults.include_base_properties),
    })
}

/// Name of the transfer property for `member`: the [`DTO_NAME`] argument
/// when it is a non-empty string, else the member name.
pub fn target_name(member: &MemberSymbol) -> String {
    member
        .marker(DTO_NAME)
        .and_then(|m| m.positional(0))
        .and_then(|value| value.as_str())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(member.name.as_str())
        .to_string()
}

/// Whether `member` carries [`DTO_IGNORE`].
pub fn is_ignored(member: &MemberSymbol) -> bool {
    member.has_marker(DTO_IGNORE)
}
