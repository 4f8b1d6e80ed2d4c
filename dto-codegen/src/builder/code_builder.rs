//! Line-oriented text assembly with brace-block indentation.

use super::{CodeFragment, Renderable};

/// One indentation level in generated C#.
const CSHARP_INDENT: &str = "    ";

/// Accumulates generated source, one line at a time.
///
/// Blocks are laid out Allman style: the header, `{` on its own line, the
/// body one level deeper, then the closing line.
///
/// ```
/// use dtogen_codegen::builder::{CodeBuilder, CodeFragment};
///
/// let class = CodeFragment::block(
///     "public partial class UserDto",
///     vec![CodeFragment::line("public int Id { get; set; }")],
/// );
/// let code = CodeBuilder::csharp().line("using System;").blank().node(&vec![class]).build();
///
/// assert_eq!(
///     code,
///     "using System;\n\npublic partial class UserDto\n{\n    public int Id { get; set; }\n}\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    unit: &'static str,
    depth: usize,
    out: String,
}

impl CodeBuilder {
    /// A builder indenting by `unit` per level.
    pub fn new(unit: &'static str) -> Self {
        Self {
            unit,
            depth: 0,
            out: String::new(),
        }
    }

    /// A builder with four-space indentation.
    pub fn csharp() -> Self {
        Self::new(CSHARP_INDENT)
    }

    /// Append a line at the current depth.
    pub fn line(mut self, text: &str) -> Self {
        self.write_line(text);
        self
    }

    /// Append an empty line; never indented.
    pub fn blank(mut self) -> Self {
        self.out.push('\n');
        self
    }

    /// Append every fragment of `node`.
    pub fn node(mut self, node: &(impl Renderable + ?Sized)) -> Self {
        for fragment in node.to_fragments() {
            self.apply(fragment);
        }
        self
    }

    pub fn build(self) -> String {
        self.out
    }

    fn apply(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(text) => self.write_line(&text),
            CodeFragment::Blank => self.out.push('\n'),
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.write_line(&header);
                self.write_line("{");
                self.depth += 1;
                for inner in body {
                    self.apply(inner);
                }
                self.depth -= 1;
                self.write_line(&close);
            }
        }
    }

    fn write_line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(self.unit);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }
}
