//! Core utilities and types for the dtogen transfer-type generator.
//!
//! This crate provides the file-writing primitives and identifier helpers
//! shared by the snapshot model, the engine and the CLI.

mod file;
mod ident;

// File operations
pub use file::{File, GeneratedFile, WriteResult};
// Identifier utilities
pub use ident::{escape_identifier, is_csharp_keyword, is_valid_identifier, qualified_name};
