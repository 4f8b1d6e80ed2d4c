//! Pipeline phases.

use eyre::Result;

use super::CompilationContext;

/// Name and summary of a phase, for listings.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// One step of the pipeline.
///
/// `lower` and `validate` always run first, in that order; phases added with
/// [`Pipeline::phase`](super::Pipeline::phase) run after them and see the
/// validated descriptors.
pub trait Phase: Send + Sync {
    /// Passed to plugin hooks and recorded on diagnostics.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Returning an error stops the pipeline. Problems the user can fix
    /// belong in `ctx.diagnostics`.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
