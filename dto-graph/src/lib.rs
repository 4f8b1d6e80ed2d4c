//! Host symbol graph snapshot for the dtogen generator.
//!
//! The generator never parses C# itself. A host analysis tool exports the
//! types it knows about (identity, inheritance, members, attached markers
//! and declaration bodies) as a TOML snapshot, and this crate turns that
//! snapshot into a [`TypeGraph`] the engine can query through the
//! [`SymbolGraph`] trait.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod graph;
mod marker;
mod options;
mod parse;
mod symbol;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use file::SnapshotFile;
pub use graph::{SymbolGraph, TypeGraph};
pub use marker::{Marker, MarkerValue, TypeOf};
pub use options::{DEFAULT_HOOK_CONTRACT, GeneratorOptions};
pub use parse::parse_snapshot;
pub use symbol::{Accessibility, Accessor, MemberKind, MemberSymbol, TypeKind, TypeSymbol};
