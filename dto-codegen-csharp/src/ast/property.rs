//! Auto-property declarations.

use dtogen_codegen::builder::{CodeFragment, Renderable};

/// A `{ get; set; }` auto-property.
#[derive(Debug, Clone)]
pub struct Property {
    pub name: String,
    pub ty: String,
    pub access: String,
    pub is_required: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            access: "public".to_string(),
            is_required: false,
        }
    }

    pub fn required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }
}

impl Renderable for Property {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let required = if self.is_required { "required " } else { "" };
        vec![CodeFragment::line(format!(
            "{} {}{} {} {{ get; set; }}",
            self.access, required, self.ty, self.name
        ))]
    }
}

#[cfg(test)]
mod tests {
    use dtogen_codegen::builder::CodeBuilder;

    use super::*;

    #[test]
    fn test_plain_property() {
        let code = CodeBuilder::csharp()
            .node(&Property::new("Id", "int"))
            .build();
        assert_eq!(code, "public int Id { get; set; }\n");
    }

    #[test]
    fn test_required_property() {
        let code = CodeBuilder::csharp()
            .node(&Property::new("FirstName", "string").required(true))
            .build();
        assert_eq!(code, "public required string FirstName { get; set; }\n");
    }
}
