use std::path::PathBuf;

use clap::Args;
use dtogen_codegen::pipeline::{CompilationContext, Pipeline};
use eyre::Result;

use super::{load_graph, print_diagnostics};
use crate::timing::PhaseTimer;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the type snapshot (defaults to ./dtogen.toml)
    #[arg(short, long, default_value = "dtogen.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let graph = load_graph(&self.config);
        let type_count = graph.len();

        // Keep the context so diagnostics survive a failed validation
        let mut ctx = CompilationContext::new(graph);
        let timer = PhaseTimer::default();
        let outcome = Pipeline::new().plugin(timer.clone()).run_with(&mut ctx);
        tracing::info!(elapsed_ms = timer.total().as_secs_f64() * 1000.0, "pipeline finished");

        print_diagnostics(&ctx);

        if let Err(err) = outcome {
            eprintln!("\n{}", err);
            std::process::exit(1);
        }

        if ctx.has_warnings() {
            println!();
        }

        println!("✓ {} is valid\n", self.config.display());

        let descriptors = ctx.descriptors();
        println!(
            "  {} type{}, {} transfer type{}",
            type_count,
            plural(type_count),
            descriptors.len(),
            plural(descriptors.len())
        );
        for descriptor in descriptors {
            println!(
                "    {} -> {} ({} propert{})",
                descriptor.qualified_source_name(),
                descriptor.target_type_name,
                descriptor.properties.len(),
                if descriptor.properties.len() == 1 { "y" } else { "ies" }
            );
        }

        Ok(())
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
