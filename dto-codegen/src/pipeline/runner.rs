//! Pipeline orchestrator.

use dtogen_graph::TypeGraph;
use eyre::Result;

use super::{
    CompilationContext, Phase, Plugin,
    phases::{LowerPhase, ValidatePhase},
};

/// Runs `lower`, `validate`, then any added phases, calling every plugin
/// around each one.
///
/// ```
/// use dtogen_codegen::pipeline::Pipeline;
/// use dtogen_graph::{Marker, MemberSymbol, TypeGraph, TypeSymbol};
///
/// let user = TypeSymbol::class("App", "User")
///     .with_marker(Marker::new("GenerateDto"))
///     .with_member(MemberSymbol::property("Id", "int"));
///
/// let ctx = Pipeline::new().run(TypeGraph::from_types(vec![user]))?;
/// assert_eq!(ctx.descriptors()[0].target_type_name, "UserDto");
/// # Ok::<(), eyre::Report>(())
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// A pipeline with only the built-in phases.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Append a phase; it runs after validation.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Register a plugin for before/after hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Compile `graph` into a context holding descriptors and diagnostics.
    ///
    /// # Errors
    ///
    /// Fails when a phase or plugin fails, including when validation
    /// reported errors. The diagnostics are lost with the context; use
    /// [`run_with`](Self::run_with) to keep them.
    pub fn run(&self, graph: TypeGraph) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(graph);
        self.run_with(&mut ctx)?;
        Ok(ctx)
    }

    /// Like [`run`](Self::run), on a caller-owned context. Diagnostics
    /// recorded before a failure stay in `ctx`.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn run_with(&self, ctx: &mut CompilationContext) -> Result<()> {
        // Lints read descriptors, so lowering comes first
        let builtin_phases: Vec<Box<dyn Phase>> =
            vec![Box::new(LowerPhase), Box::new(ValidatePhase::new())];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), ctx)?;
        }

        Ok(())
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();
        tracing::debug!(phase = phase_name, "running phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use dtogen_graph::{Marker, MemberSymbol, TypeSymbol};

    use super::*;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct RecordingPhase(Arc<Mutex<Vec<String>>>);

    impl Phase for RecordingPhase {
        fn name(&self) -> &'static str {
            "record"
        }

        fn description(&self) -> &'static str {
            "Record the target names seen after validation"
        }

        fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
            let mut seen = self.0.lock().unwrap();
            seen.extend(ctx.descriptors().iter().map(|d| d.target_type_name.clone()));
            Ok(())
        }
    }

    fn graph() -> TypeGraph {
        TypeGraph::from_types(vec![
            TypeSymbol::class("App", "User")
                .with_marker(Marker::new("GenerateDto"))
                .with_member(MemberSymbol::property("Id", "int")),
            TypeSymbol::class("App", "Order")
                .with_marker(Marker::new("GenerateDto").arg("Model"))
                .with_member(MemberSymbol::property("Total", "decimal")),
            TypeSymbol::class("App", "Plain"),
        ])
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let ctx = Pipeline::new().run(graph()).expect("pipeline should succeed");

        let names: Vec<_> = ctx
            .descriptors()
            .iter()
            .map(|d| d.target_type_name.as_str())
            .collect();
        assert_eq!(names, vec!["UserDto", "OrderModel"]);
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        let _ = pipeline.run(graph()).expect("pipeline should succeed");

        // 2 built-in phases = 2 before + 2 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 2);
        assert_eq!(after_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_user_phase_runs_last() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new().phase(RecordingPhase(seen.clone()));

        pipeline.run(graph()).expect("pipeline should succeed");
        assert_eq!(*seen.lock().unwrap(), vec!["UserDto", "OrderModel"]);
    }

    #[test]
    fn test_validation_failure_keeps_diagnostics() {
        let graph = TypeGraph::from_types(vec![
            TypeSymbol::class("App", "User").with_marker(Marker::new("GenerateDto")),
            TypeSymbol::class("App", "UserD").with_marker(Marker::new("GenerateDto").arg("to")),
        ]);
        let mut ctx = CompilationContext::new(graph);

        let result = Pipeline::new().run_with(&mut ctx);
        assert!(result.is_err());
        assert_eq!(ctx.error_count(), 1);
    }
}
