//! The `<Target>.g.cs` unit for one transfer type.

use dtogen_codegen::{
    ClassDescriptor,
    builder::{CodeBuilder, CodeFragment, Renderable, Template, TemplateError, escape_braces},
};
use dtogen_core::GeneratedFile;

use crate::ast::{Class, Method, Namespace, ObjectInit, Param, Property};

/// First line of every generated unit.
pub const GENERATED_HEADER: &str = "// <auto-generated />";

/// One ToString field, as it appears inside the interpolated string.
const FIELD_TEMPLATE: &str = "{label} = {{{member}}}";
/// The whole interpolated string body.
const DISPLAY_TEMPLATE: &str = "{target} {open}{fields}{close}";

/// A transfer type rendered as a C# source unit.
#[derive(Debug, Clone)]
pub struct DtoUnit {
    descriptor: ClassDescriptor,
    hook_contract: String,
    display: String,
}

impl DtoUnit {
    /// Prepare a unit; `hook_contract` is the namespace-qualified generic
    /// interface implemented when hooks are enforced.
    pub fn new(
        descriptor: ClassDescriptor,
        hook_contract: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let display = display_text(&descriptor)?;
        Ok(Self {
            descriptor,
            hook_contract: hook_contract.into(),
            display,
        })
    }

    pub fn descriptor(&self) -> &ClassDescriptor {
        &self.descriptor
    }

    /// Fully qualified source type, as the emitted code refers to it.
    fn entity_type(&self) -> String {
        format!("global::{}", self.descriptor.qualified_source_name())
    }

    fn hooks_enforced(&self) -> bool {
        let config = &self.descriptor.configuration;
        config.generate_mapper && config.enforce_hooks
    }

    fn build_class(&self) -> Class {
        let descriptor = &self.descriptor;
        let properties: Vec<Property> = descriptor
            .properties
            .iter()
            .map(|p| Property::new(&p.target_name, &p.type_name).required(p.is_required))
            .collect();

        let mut class = Class::new(&descriptor.target_type_name)
            .access(&descriptor.target_access_modifier)
            .section(&properties)
            .section(&self.to_string_method());

        if self.hooks_enforced() {
            let contract = self
                .hook_contract
                .strip_prefix("global::")
                .unwrap_or(&self.hook_contract);
            class = class.base(format!("global::{}<{}>", contract, self.entity_type()));
        }

        if descriptor.configuration.generate_mapper {
            class = class
                .section(&self.hook_stubs())
                .section(&self.from_entity())
                .section(&self.to_entity());
        }

        class
    }

    fn to_string_method(&self) -> Method {
        Method::new("ToString", "string")
            .modifier("public")
            .modifier("override")
            .body_line(format!("return $\"{}\";", self.display))
    }

    /// Optional partial hooks; enforced mode gets them from the contract.
    fn hook_stubs(&self) -> Vec<Method> {
        if self.hooks_enforced() {
            return Vec::new();
        }
        let entity = self.entity_type();
        vec![
            Method::partial("OnDtoCreated").param(Param::new(&entity, "sourceEntity")),
            Method::partial("OnEntityCreated").param(Param::new(&entity, "targetEntity")),
        ]
    }

    fn from_entity(&self) -> Method {
        let descriptor = &self.descriptor;
        let target = &descriptor.target_type_name;

        let init = descriptor
            .properties
            .iter()
            .fold(ObjectInit::new("dto", target), |init, p| {
                let value = match (&p.value_expression, p.source_member()) {
                    (Some(expression), _) if p.is_virtual => expression.clone(),
                    (_, Some(member)) => format!("entity.{}", member),
                    _ => format!("entity.{}", p.target_name),
                };
                init.assign(&p.target_name, value)
            });

        Method::new("FromEntity", target)
            .modifier("public")
            .modifier("static")
            .param(Param::new(self.entity_type(), "entity"))
            .body_line("if (entity is null) throw new ArgumentNullException(nameof(entity));")
            .body_node(&init)
            .body_line("dto.OnDtoCreated(entity);")
            .body_line("return dto;")
    }

    fn to_entity(&self) -> Method {
        let entity = self.entity_type();

        let init = self
            .descriptor
            .plain_properties()
            .filter(|p| p.write_back)
            .filter_map(|p| p.source_member().map(|member| (member, &p.target_name)))
            .fold(ObjectInit::new("entity", &entity), |init, (member, target)| {
                init.assign(member, format!("this.{}", target))
            });

        Method::new("ToEntity", &entity)
            .modifier("public")
            .body_node(&init)
            .body_line("this.OnEntityCreated(entity);")
            .body_line("return entity;")
    }
}

impl Renderable for DtoUnit {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        Namespace::new(&self.descriptor.source_namespace)
            .node(&self.build_class())
            .to_fragments()
    }
}

impl GeneratedFile for DtoUnit {
    fn file_name(&self) -> String {
        format!("{}.g.cs", self.descriptor.target_type_name)
    }

    fn render(&self) -> String {
        CodeBuilder::csharp()
            .line(GENERATED_HEADER)
            .line("#nullable enable")
            .line("using System;")
            .blank()
            .node(self)
            .build()
    }
}

/// Text of the interpolated string returned by `ToString`, e.g.
/// `UserDto {{ Id = {Id}, Name = {Name} }}`.
fn display_text(descriptor: &ClassDescriptor) -> Result<String, TemplateError> {
    let field = Template::parse(FIELD_TEMPLATE)?;
    let fields = descriptor
        .properties
        .iter()
        .map(|p| {
            let label = escape_braces(&p.target_name);
            field.render(&[("label", label.as_str()), ("member", p.target_name.as_str())])
        })
        .collect::<Result<Vec<_>, _>>()?;

    let fields = if fields.is_empty() {
        " ".to_string()
    } else {
        format!(" {} ", fields.join(", "))
    };

    let target = escape_braces(&descriptor.target_type_name);
    let open = escape_braces("{");
    let close = escape_braces("}");
    Template::parse(DISPLAY_TEMPLATE)?.render(&[
        ("target", target.as_str()),
        ("open", open.as_str()),
        ("fields", fields.as_str()),
        ("close", close.as_str()),
    ])
}
