//! Compilation pipeline for transfer-type generation.
//!
//! This module provides a [`Pipeline`] orchestrator that manages the phases
//! from the symbol graph to emitter-ready descriptors. The pipeline provides:
//!
//! - Explicit phase boundaries (lower → validate)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//! - Shared state via [`CompilationContext`]
//!
//! # Example
//!
//! ```ignore
//! use dtogen_codegen::pipeline::{Pipeline, Severity};
//!
//! let ctx = Pipeline::new().run(graph)?;
//!
//! for diag in &ctx.diagnostics {
//!     if matches!(diag.severity, Severity::Warning) {
//!         eprintln!("warning: {}", diag.message);
//!     }
//! }
//!
//! let generator = Generator::from_context(ctx)?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
