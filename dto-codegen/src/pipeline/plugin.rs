//! Observers wrapped around every phase.

use eyre::Result;

use super::CompilationContext;

/// Hooks called around each phase, built-in ones included.
///
/// ```
/// use dtogen_codegen::pipeline::{CompilationContext, Plugin};
///
/// struct SummaryPlugin;
///
/// impl Plugin for SummaryPlugin {
///     fn name(&self) -> &'static str {
///         "summary"
///     }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> eyre::Result<()> {
///         if phase == "lower" {
///             println!("{} transfer types", ctx.descriptors().len());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// An error here aborts the pipeline before `phase` runs.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Only called when `phase` succeeded.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}
