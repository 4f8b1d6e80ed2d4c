//! C# emitter for dtogen.
//!
//! Renders each [`ClassDescriptor`](dtogen_codegen::ClassDescriptor) into a
//! partial class with its properties, a `ToString` override and, when
//! mapping is enabled, `FromEntity`/`ToEntity` with their hook call sites.

mod generator;

pub mod ast;
pub mod files;

pub use ast::{Class, Method, Namespace, ObjectInit, Param, Property};
pub use dtogen_codegen::{GenerateResult, LanguageCodegen, PreviewFile};
pub use files::{DtoUnit, GENERATED_HEADER};
pub use generator::Generator;
