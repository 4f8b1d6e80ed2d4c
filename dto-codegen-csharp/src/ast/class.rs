//! Class and namespace declarations.

use dtogen_codegen::builder::{CodeFragment, Renderable};

/// A `partial class` whose members are grouped into sections separated by
/// blank lines.
#[derive(Debug, Clone)]
pub struct Class {
    name: String,
    access: String,
    bases: Vec<String>,
    sections: Vec<Vec<CodeFragment>>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: "public".to_string(),
            bases: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn access(mut self, access: impl Into<String>) -> Self {
        self.access = access.into();
        self
    }

    /// Add a base type or implemented interface.
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    /// Add a group of members. Empty groups are dropped.
    pub fn section(mut self, members: &impl Renderable) -> Self {
        let fragments = members.to_fragments();
        if !fragments.is_empty() {
            self.sections.push(fragments);
        }
        self
    }

    fn header(&self) -> String {
        let mut header = format!("{} partial class {}", self.access, self.name);
        if !self.bases.is_empty() {
            header.push_str(" : ");
            header.push_str(&self.bases.join(", "));
        }
        header
    }
}

impl Renderable for Class {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut body = Vec::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::blank());
            }
            body.extend(section.iter().cloned());
        }
        vec![CodeFragment::block(self.header(), body)]
    }
}

/// A block-scoped namespace; the global namespace renders its body bare.
#[derive(Debug, Clone)]
pub struct Namespace {
    name: String,
    body: Vec<CodeFragment>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Vec::new(),
        }
    }

    pub fn node(mut self, node: &impl Renderable) -> Self {
        self.body.extend(node.to_fragments());
        self
    }
}

impl Renderable for Namespace {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        if self.name.is_empty() {
            self.body.clone()
        } else {
            vec![CodeFragment::block(
                format!("namespace {}", self.name),
                self.body.clone(),
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use dtogen_codegen::builder::CodeBuilder;

    use super::*;
    use crate::ast::Property;

    #[test]
    fn test_sections_separated_by_blank_lines() {
        let class = Class::new("UserDto")
            .access("internal")
            .section(&vec![Property::new("Id", "int"), Property::new("Name", "string")])
            .section(&Vec::<Property>::new())
            .section(&Property::new("Age", "int"));

        let code = CodeBuilder::csharp().node(&class).build();
        assert_eq!(
            code,
            "internal partial class UserDto\n{\n    public int Id { get; set; }\n    public string Name { get; set; }\n\n    public int Age { get; set; }\n}\n"
        );
    }

    #[test]
    fn test_bases() {
        let class = Class::new("UserDto").base("global::Hooks<global::App.User>");
        let code = CodeBuilder::csharp().node(&class).build();
        assert!(code.starts_with("public partial class UserDto : global::Hooks<global::App.User>\n"));
    }

    #[test]
    fn test_global_namespace_is_bare() {
        let class = Class::new("ThingDto");
        let scoped = CodeBuilder::csharp()
            .node(&Namespace::new("App").node(&class))
            .build();
        let bare = CodeBuilder::csharp()
            .node(&Namespace::new("").node(&class))
            .build();

        assert_eq!(scoped, "namespace App\n{\n    public partial class ThingDto\n    {\n    }\n}\n");
        assert_eq!(bare, "public partial class ThingDto\n{\n}\n");
    }
}
