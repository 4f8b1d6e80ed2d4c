//! Object creation with an initializer list.

use dtogen_codegen::builder::{CodeFragment, Renderable};

/// `var <variable> = new <Type> { Member = value, ... };`
///
/// Every assignment keeps a trailing comma, so the list renders the same
/// whether it holds zero, one or many entries.
#[derive(Debug, Clone)]
pub struct ObjectInit {
    variable: String,
    ty: String,
    assignments: Vec<(String, String)>,
}

impl ObjectInit {
    pub fn new(variable: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            ty: ty.into(),
            assignments: Vec::new(),
        }
    }

    pub fn assign(mut self, member: impl Into<String>, value: impl Into<String>) -> Self {
        self.assignments.push((member.into(), value.into()));
        self
    }
}

impl Renderable for ObjectInit {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let body = self
            .assignments
            .iter()
            .map(|(member, value)| CodeFragment::line(format!("{} = {},", member, value)))
            .collect();

        vec![CodeFragment::block_with_close(
            format!("var {} = new {}", self.variable, self.ty),
            body,
            "};",
        )]
    }
}
