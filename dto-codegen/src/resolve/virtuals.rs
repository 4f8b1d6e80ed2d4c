//! Virtual (computed) property resolution.

use dtogen_core::is_valid_identifier;
use dtogen_graph::{Marker, TypeSymbol};
use thiserror::Error;

use crate::descriptor::PropertyDescriptor;
use crate::expr::{CANONICAL_PARAMETER, ExprError, normalize_lambda};
use crate::extract::{DTO_VIRTUAL_PROPERTY, EXPRESSION_MEMBER_NAME};

/// Why a virtual property declaration was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DropReason {
    #[error("missing property name")]
    MissingName,

    #[error("'{0}' is not a valid property name")]
    InvalidName(String),

    #[error("missing or unresolved property type")]
    MissingType,

    #[error("expression member '{0}' not found")]
    MemberNotFound(String),

    #[error("expression member '{0}' has no declaration body")]
    MissingBody(String),

    #[error("expression member '{member}': {source}")]
    Expression {
        member: String,
        #[source]
        source: ExprError,
    },

    #[error("value expression is empty")]
    EmptyExpression,
}

/// A virtual property declaration that produced no descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedProperty {
    /// Declared name, or `#<index>` when the name itself was unusable.
    pub name: String,
    pub reason: DropReason,
}

/// Resolve every virtual property declared on `ty`, in marker order.
///
/// Declarations that cannot be resolved are returned separately; they never
/// abort resolution of the rest.
pub fn resolve_virtual_properties(
    ty: &TypeSymbol,
) -> (Vec<PropertyDescriptor>, Vec<DroppedProperty>) {
    let mut resolved = Vec::new();
    let mut dropped = Vec::new();

    for (index, marker) in ty.markers_named(DTO_VIRTUAL_PROPERTY).enumerate() {
        match resolve_one(ty, marker) {
            Ok(property) => resolved.push(property),
            Err(reason) => {
                let name = marker
                    .positional(0)
                    .and_then(|v| v.as_str())
                    .filter(|name| !name.trim().is_empty())
                    .map_or_else(|| format!("#{}", index), str::to_string);
                dropped.push(DroppedProperty { name, reason });
            }
        }
    }

    (resolved, dropped)
}

fn resolve_one(ty: &TypeSymbol, marker: &Marker) -> Result<PropertyDescriptor, DropReason> {
    let name = marker
        .positional(0)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(DropReason::MissingName)?;
    if !is_valid_identifier(name) {
        return Err(DropReason::InvalidName(name.to_string()));
    }

    let type_name = marker
        .positional(1)
        .and_then(|v| v.as_type())
        .map(str::trim)
        .filter(|ty| !ty.is_empty())
        .ok_or(DropReason::MissingType)?;

    let member_name = marker
        .named(EXPRESSION_MEMBER_NAME)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|member| !member.is_empty());

    let expression = match member_name {
        Some(member) => resolve_member_expression(ty, member)?,
        None => marker
            .positional(2)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
    };

    if expression.trim().is_empty() {
        return Err(DropReason::EmptyExpression);
    }

    Ok(PropertyDescriptor::computed(name, type_name, expression))
}

/// Find `member` on `ty` and normalize its lambda body.
pub fn resolve_member_expression(ty: &TypeSymbol, member: &str) -> Result<String, DropReason> {
    let symbol = ty
        .member(member)
        .ok_or_else(|| DropReason::MemberNotFound(member.to_string()))?;
    let body = symbol
        .body
        .as_deref()
        .filter(|body| !body.trim().is_empty())
        .ok_or_else(|| DropReason::MissingBody(member.to_string()))?;

    normalize_lambda(body, CANONICAL_PARAMETER).map_err(|source| DropReason::Expression {
        member: member.to_string(),
        source,
    })
}
