//! State threaded through the pipeline.

use dtogen_graph::TypeGraph;
use eyre::{Result, eyre};

use super::diagnostic::{Diagnostic, Severity};
use crate::descriptor::ClassDescriptor;

/// The graph under compilation plus everything phases derive from it.
#[derive(Debug)]
pub struct CompilationContext {
    pub graph: TypeGraph,
    /// One descriptor per candidate type in graph order; `None` until
    /// lowering has run.
    pub descriptors: Option<Vec<ClassDescriptor>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(graph: TypeGraph) -> Self {
        Self {
            graph,
            descriptors: None,
            diagnostics: Vec::new(),
        }
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.with_severity(Severity::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.with_severity(Severity::Warning).count()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    /// Descriptors lowered so far; empty before lowering.
    pub fn descriptors(&self) -> &[ClassDescriptor] {
        self.descriptors.as_deref().unwrap_or_default()
    }

    /// Move the descriptors out, for handing to an emitter.
    ///
    /// # Errors
    ///
    /// Fails when lowering has not run or the descriptors were already taken.
    pub fn take_descriptors(&mut self) -> Result<Vec<ClassDescriptor>> {
        self.descriptors
            .take()
            .ok_or_else(|| eyre!("descriptors not set - did LowerPhase run?"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let ctx = CompilationContext::new(TypeGraph::default());

        assert!(ctx.descriptors.is_none());
        assert!(ctx.descriptors().is_empty());
        assert!(ctx.diagnostics.is_empty());
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_counts_by_severity() {
        let mut ctx = CompilationContext::new(TypeGraph::default());
        ctx.diagnostics.extend([
            Diagnostic::error("validate", "duplicate target type"),
            Diagnostic::warning("lower", "virtual property dropped"),
            Diagnostic::warning("validate", "no properties"),
            Diagnostic::info("lower", "done"),
        ]);

        assert!(ctx.has_errors());
        assert!(ctx.has_warnings());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warning_count(), 2);
        assert_eq!(
            ctx.warnings().map(|d| d.phase.as_str()).collect::<Vec<_>>(),
            vec!["lower", "validate"]
        );
    }

    #[test]
    fn test_take_descriptors_before_lower() {
        let mut ctx = CompilationContext::new(TypeGraph::default());
        assert!(ctx.take_descriptors().is_err());

        ctx.descriptors = Some(Vec::new());
        assert!(ctx.take_descriptors().unwrap().is_empty());
        assert!(ctx.take_descriptors().is_err());
    }
}
