//! Generator options carried in the `[options]` table of a snapshot.

use serde::Deserialize;

/// Default fully-qualified name of the enforced hook contract.
pub const DEFAULT_HOOK_CONTRACT: &str = "DtoGenerator.IDtoMapperHooks";

/// Options that shape emitted code but are not per-type configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Generic interface a transfer type implements when hooks are enforced.
    pub hook_contract: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            hook_contract: DEFAULT_HOOK_CONTRACT.to_string(),
        }
    }
}
