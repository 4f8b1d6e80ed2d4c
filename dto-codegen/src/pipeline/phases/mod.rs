//! Built-in pipeline phases.
//!
//! This module provides the standard phases that run in every pipeline:
//!
//! - [`LowerPhase`] - resolves candidate types into class descriptors
//! - [`ValidatePhase`] - lints the descriptors and collects diagnostics

mod lower;
mod validate;

pub use lower::LowerPhase;
pub use validate::{
    DuplicatePropertyLint, DuplicateTargetLint, EmptyTransferLint, InvalidTargetNameLint, Lint,
    LintInfo, MemberConflictLint, ValidatePhase,
};
