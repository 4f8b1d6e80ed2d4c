//! Per-phase timing, logged at `info` level.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use dtogen_codegen::pipeline::{CompilationContext, Plugin};
use eyre::{Result, eyre};

#[derive(Default)]
struct Timings {
    started: HashMap<String, Instant>,
    finished: Vec<(String, Duration)>,
}

/// Records how long each pipeline phase took.
///
/// Clones share their records, so a handle kept by the caller sees the
/// timings of the copy registered with the pipeline.
#[derive(Clone, Default)]
pub struct PhaseTimer {
    timings: Arc<Mutex<Timings>>,
}

impl PhaseTimer {
    /// Completed phases in run order.
    pub fn finished(&self) -> Vec<(String, Duration)> {
        match self.timings.lock() {
            Ok(timings) => timings.finished.clone(),
            Err(poisoned) => poisoned.into_inner().finished.clone(),
        }
    }

    /// Sum of all completed phases.
    pub fn total(&self) -> Duration {
        self.finished().iter().map(|(_, elapsed)| *elapsed).sum()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Timings>> {
        self.timings
            .lock()
            .map_err(|_| eyre!("phase timings lock poisoned"))
    }
}

impl Plugin for PhaseTimer {
    fn name(&self) -> &'static str {
        "timing"
    }

    fn on_before_phase(&self, phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
        self.lock()?.started.insert(phase.to_string(), Instant::now());
        Ok(())
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let mut timings = self.lock()?;
        if let Some(start) = timings.started.remove(phase) {
            let elapsed = start.elapsed();
            tracing::info!(
                phase,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                diagnostics = ctx.diagnostics.len(),
                "phase finished"
            );
            timings.finished.push((phase.to_string(), elapsed));
        }
        Ok(())
    }
}
