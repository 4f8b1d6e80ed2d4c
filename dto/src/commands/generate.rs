use std::path::PathBuf;

use clap::Args;
use dtogen_codegen::{LanguageCodegen, pipeline::Pipeline};
use dtogen_codegen_csharp::Generator;
use eyre::{Context, Result};

use super::{load_graph, print_diagnostic};
use crate::timing::PhaseTimer;

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the type snapshot (defaults to ./dtogen.toml)
    #[arg(short, long, default_value = "dtogen.toml")]
    pub config: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let graph = load_graph(&self.config);

        let timer = PhaseTimer::default();
        let ctx = Pipeline::new()
            .plugin(timer.clone())
            .run(graph)
            .wrap_err("Pipeline failed")?;
        tracing::info!(elapsed_ms = timer.total().as_secs_f64() * 1000.0, "pipeline finished");

        for diag in ctx.warnings() {
            print_diagnostic(diag);
        }

        let generator = Generator::from_context(ctx).wrap_err("Failed to prepare transfer types")?;

        if self.dry_run {
            self.run_preview(&generator)
        } else {
            self.run_generation(&generator)
        }
    }

    fn run_generation(&self, generator: &Generator) -> Result<()> {
        let result = generator
            .generate(&self.output)
            .wrap_err("Failed to generate code")?;

        for file in &result.written {
            println!("  + {}", file);
        }
        for file in &result.unchanged {
            println!("  = {}", file);
        }

        println!();
        println!(
            "Generated: {} ({} written, {} unchanged)",
            self.output.display(),
            result.written.len(),
            result.unchanged.len()
        );

        Ok(())
    }

    fn run_preview<G: LanguageCodegen>(&self, generator: &G) -> Result<()> {
        let files = generator.preview();

        for file in &files {
            println!("── {} ──", file.path);
            println!("{}", file.content);
        }

        println!("── Summary ──");
        println!("{} files would be generated", files.len());

        Ok(())
    }
}
