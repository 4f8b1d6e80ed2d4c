use std::path::PathBuf;

use clap::Args;
use dtogen_codegen::resolve::describe_class;
use dtogen_graph::SymbolGraph;
use eyre::Result;

use super::load_graph;

#[derive(Args)]
pub struct ListCommand {
    /// Path to the type snapshot (defaults to ./dtogen.toml)
    #[arg(short, long, default_value = "dtogen.toml")]
    pub config: PathBuf,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let graph = load_graph(&self.config);

        let resolutions: Vec<_> = graph
            .types()
            .iter()
            .filter_map(|ty| describe_class(&graph, ty))
            .collect();

        if resolutions.is_empty() {
            println!("No transfer types defined");
            return Ok(());
        }

        println!("Transfer types:");
        for resolution in &resolutions {
            let descriptor = &resolution.descriptor;
            println!(
                "  {} {} (from {})",
                descriptor.target_access_modifier,
                descriptor.qualified_target_name(),
                descriptor.source_type_name
            );

            for property in &descriptor.properties {
                let mut flags = Vec::new();
                if property.is_required {
                    flags.push("required");
                }
                if property.is_virtual {
                    flags.push("virtual");
                } else if !property.write_back {
                    flags.push("read-only");
                }

                let renamed = match property.source_member() {
                    Some(member) if member != property.target_name => format!(" <- {}", member),
                    _ => String::new(),
                };
                let flags = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", flags.join(", "))
                };

                println!(
                    "    {}: {}{}{}",
                    property.target_name, property.type_name, renamed, flags
                );
            }

            for dropped in &resolution.dropped {
                println!("    ! {} skipped: {}", dropped.name, dropped.reason);
            }
        }

        Ok(())
    }
}
