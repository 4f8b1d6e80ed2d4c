//! Method declarations.

use dtogen_codegen::builder::{CodeFragment, Renderable};

/// A method parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

impl Param {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// A method with a block body, or a partial declaration without one.
#[derive(Debug, Clone)]
pub struct Method {
    name: String,
    modifiers: Vec<String>,
    return_type: String,
    params: Vec<Param>,
    body: Option<Vec<CodeFragment>>,
}

impl Method {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            return_type: return_type.into(),
            params: Vec::new(),
            body: Some(Vec::new()),
        }
    }

    /// `partial void <name>(...);` with no implementation.
    pub fn partial(name: impl Into<String>) -> Self {
        Self {
            body: None,
            ..Self::new(name, "void").modifier("partial")
        }
    }

    pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Add a statement line to the body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body
            .get_or_insert_with(Vec::new)
            .push(CodeFragment::line(line));
        self
    }

    /// Add a rendered node to the body.
    pub fn body_node(mut self, node: &impl Renderable) -> Self {
        self.body
            .get_or_insert_with(Vec::new)
            .extend(node.to_fragments());
        self
    }

    fn signature(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ");

        let mut parts = self.modifiers.clone();
        parts.push(self.return_type.clone());
        format!("{} {}({})", parts.join(" "), self.name, params)
    }
}

impl Renderable for Method {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match &self.body {
            Some(body) => vec![CodeFragment::block(self.signature(), body.clone())],
            None => vec![CodeFragment::line(format!("{};", self.signature()))],
        }
    }
}

#[cfg(test)]
mod tests {
    use dtogen_codegen::builder::CodeBuilder;

    use super::*;

    #[test]
    fn test_partial_declaration() {
        let method = Method::partial("OnDtoCreated").param(Param::new("global::App.User", "sourceEntity"));

        let code = CodeBuilder::csharp().node(&method).build();
        assert_eq!(code, "partial void OnDtoCreated(global::App.User sourceEntity);\n");
    }

    #[test]
    fn test_method_with_body() {
        let method = Method::new("ToString", "string")
            .modifier("public")
            .modifier("override")
            .body_line("return \"UserDto\";");

        let code = CodeBuilder::csharp().node(&method).build();
        assert_eq!(
            code,
            "public override string ToString()\n{\n    return \"UserDto\";\n}\n"
        );
    }
}
