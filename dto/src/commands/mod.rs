mod check;
mod completions;
mod generate;
mod list;

use std::path::Path;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use dtogen_codegen::pipeline::{CompilationContext, Diagnostic, Severity};
use dtogen_graph::{SnapshotFile, TypeGraph};
use eyre::Result;
use generate::GenerateCommand;
use list::ListCommand;

/// Extension trait for exiting on snapshot errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for dtogen_graph::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "dtogen")]
#[command(version)]
#[command(about = "Generate C# transfer types from annotated type snapshots")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate transfer types from dtogen.toml
    Generate(GenerateCommand),

    /// Validate dtogen.toml without generating code
    Check(CheckCommand),

    /// List candidate types and their transfer properties
    List(ListCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Load a snapshot, exiting with a rendered report when it is invalid.
fn load_graph(config: &Path) -> TypeGraph {
    tracing::debug!(config = %config.display(), "loading snapshot");
    SnapshotFile::open(config).unwrap_or_exit().into_graph()
}

/// Print a diagnostic; errors and warnings go to stderr.
fn print_diagnostic(diag: &Diagnostic) {
    let text = match &diag.location {
        Some(loc) => format!("{}: {}\n  --> {}", diag.severity, diag.message, loc),
        None => format!("{}: {}", diag.severity, diag.message),
    };

    match diag.severity {
        Severity::Error | Severity::Warning => eprintln!("{}", text),
        Severity::Info => println!("{}", text),
    }
}

fn print_diagnostics(ctx: &CompilationContext) {
    for diag in &ctx.diagnostics {
        print_diagnostic(diag);
    }
}
