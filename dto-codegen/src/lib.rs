//! Transfer-type generation engine for dtogen.
//!
//! This crate turns a [`SymbolGraph`](dtogen_graph::SymbolGraph) into
//! language-agnostic [`ClassDescriptor`]s and provides the text-building
//! blocks language backends render them with.
//!
//! # Module Organization
//!
//! - [`extract`] - Marker extraction into typed [`Configuration`]
//! - [`resolve`] - Plain and virtual property resolution
//! - [`expr`] - Lambda parsing, parameter renaming and printing
//! - [`descriptor`] - The descriptors handed to emitters
//! - [`builder`] - Code generation building blocks (CodeBuilder, Template, etc.)
//! - [`pipeline`] - Phases, plugins, lints and diagnostics
//! - [`language`] - Language backend abstractions (LanguageCodegen, PreviewFile)

pub mod builder;
pub mod descriptor;
pub mod expr;
pub mod extract;
pub mod language;
pub mod pipeline;
pub mod resolve;

pub use descriptor::{ClassDescriptor, Configuration, PropertyDescriptor};
pub use language::{GenerateResult, LanguageCodegen, PreviewFile};
