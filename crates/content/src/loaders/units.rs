//! Unit catalog loader.
//!
//! Loads unit definitions from RON files. Every ability behavior is resolved
//! and every stat block validated during the load; a single bad record fails
//! the whole catalog.

use std::path::Path;

use gambit_core::UnitDefinition;

use crate::loaders::{LoadResult, read_file};
use crate::specs::UnitSpec;

/// Loader for unit catalogs from RON files.
pub struct UnitLoader;

impl UnitLoader {
    /// Load a unit catalog from a RON file.
    ///
    /// RON format: `Vec<UnitSpec>`
    ///
    /// # Returns
    ///
    /// Validated definitions in catalog order.
    pub fn load(path: &Path) -> LoadResult<Vec<UnitDefinition>> {
        let content = read_file(path)?;
        Self::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load unit catalog {}: {}", path.display(), e))
    }

    /// Parse a unit catalog from RON text.
    pub fn from_str(content: &str) -> LoadResult<Vec<UnitDefinition>> {
        let specs: Vec<UnitSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse unit catalog RON: {}", e))?;

        let mut definitions = Vec::with_capacity(specs.len());
        for spec in specs {
            let id = spec.id.clone();
            let definition = spec
                .into_definition()
                .map_err(|e| anyhow::anyhow!("Invalid unit definition '{}': {}", id, e))?;
            definitions.push(definition);
        }
        Ok(definitions)
    }
}
