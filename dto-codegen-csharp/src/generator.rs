use std::path::Path;

use dtogen_codegen::{
    ClassDescriptor, GenerateResult, LanguageCodegen, PreviewFile, pipeline::CompilationContext,
};
use dtogen_core::{GeneratedFile, WriteResult};
use dtogen_graph::GeneratorOptions;
use eyre::Result;

use crate::files::DtoUnit;

/// C# emitter producing one `<Target>.g.cs` unit per transfer type.
pub struct Generator {
    units: Vec<DtoUnit>,
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "csharp"
    }

    fn file_extension(&self) -> &'static str {
        "g.cs"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        self.units
            .iter()
            .map(|unit| PreviewFile {
                path: unit.file_name(),
                content: unit.render(),
            })
            .collect()
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();

        for unit in &self.units {
            let name = unit.file_name();
            match unit.write(output_dir)? {
                WriteResult::Written => {
                    tracing::info!(file = %name, "wrote unit");
                    result.written.push(name);
                }
                WriteResult::Unchanged => {
                    tracing::debug!(file = %name, "unit unchanged");
                    result.unchanged.push(name);
                }
            }
        }

        Ok(result)
    }
}

impl Generator {
    pub fn new(descriptors: Vec<ClassDescriptor>, options: &GeneratorOptions) -> Result<Self> {
        let units = descriptors
            .into_iter()
            .map(|descriptor| DtoUnit::new(descriptor, options.hook_contract.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { units })
    }

    /// Build a generator from a context the pipeline has run on.
    pub fn from_context(mut ctx: CompilationContext) -> Result<Self> {
        let descriptors = ctx.take_descriptors()?;
        Self::new(descriptors, ctx.graph.options())
    }

    pub fn units(&self) -> &[DtoUnit] {
        &self.units
    }
}
