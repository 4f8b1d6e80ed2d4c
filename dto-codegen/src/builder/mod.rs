//! Code generation building blocks.
//!
//! This module provides the core primitives for generating code:
//! - [`CodeBuilder`] - Fluent API for building indented code
//! - [`CodeFragment`] - Intermediate representation for code pieces
//! - [`Renderable`] - Trait for types that can be converted to code fragments
//! - [`Template`] - Named-placeholder text templates with explicit brace escaping

mod code_builder;
mod renderable;
mod template;

pub use code_builder::CodeBuilder;
pub use renderable::{CodeFragment, Renderable};
pub use template::{Template, TemplateError, escape_braces};
