//! In-memory catalog of published definitions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use vmodel_resolve::{
    resolve_chain, AsyncDefinitionLookup, DefinitionLookup, LookupError, ResolveError,
};
use vmodel_schema::VirtualModelDefinition;

use crate::error::CatalogError;
use crate::loader::{parse_definitions, DefinitionFormat};

/// Listing view of one definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub model: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    definitions: HashMap<String, VirtualModelDefinition>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and publish one definition
    pub fn insert(&mut self, definition: VirtualModelDefinition) -> Result<(), CatalogError> {
        definition.validate().map_err(|source| CatalogError::Invalid {
            origin: definition.model.clone(),
            source,
        })?;
        if self.definitions.contains_key(&definition.model) {
            return Err(CatalogError::DuplicateModel {
                model: definition.model,
            });
        }
        self.definitions.insert(definition.model.clone(), definition);
        Ok(())
    }

    pub fn from_definitions(
        definitions: impl IntoIterator<Item = VirtualModelDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition)?;
        }
        Ok(catalog)
    }

    /// Load every `.json`, `.yaml` and `.yml` file under `dir`, recursively,
    /// in path order.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let mut files = Vec::new();
        collect_files(dir, &mut files)?;
        files.sort();

        let mut catalog = Self::new();
        for path in &files {
            catalog.load_file(path)?;
        }

        info!(dir = %dir.display(), files = files.len(), models = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Load the definitions of a single file into this catalog
    pub fn load_file(&mut self, path: &Path) -> Result<usize, CatalogError> {
        let format = DefinitionFormat::from_path(path).ok_or_else(|| CatalogError::Parse {
            path: path.to_path_buf(),
            message: "unsupported file extension".to_string(),
        })?;
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let definitions = parse_definitions(&contents, format, path)?;
        let count = definitions.len();
        for definition in definitions {
            let model = definition.model.clone();
            self.insert(definition).map_err(|err| match err {
                CatalogError::Invalid { source, .. } => CatalogError::Invalid {
                    origin: format!("{} ({})", path.display(), model),
                    source,
                },
                other => other,
            })?;
        }
        debug!(path = %path.display(), definitions = count, "loaded definition file");
        Ok(count)
    }

    pub fn get(&self, model: &str) -> Option<&VirtualModelDefinition> {
        self.definitions.get(model)
    }

    pub fn contains(&self, model: &str) -> bool {
        self.definitions.contains_key(model)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All definitions sorted by model key
    pub fn entries(&self) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self
            .definitions
            .values()
            .map(|d| CatalogEntry {
                model: d.model.clone(),
                tags: d.tags.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.model.cmp(&b.model));
        entries
    }

    /// Models carrying `tag`, sorted
    pub fn models_tagged(&self, tag: &str) -> Vec<&str> {
        let mut models: Vec<&str> = self
            .definitions
            .values()
            .filter(|d| d.tags.iter().any(|t| t == tag))
            .map(|d| d.model.as_str())
            .collect();
        models.sort_unstable();
        models
    }

    /// Resolve the chain of every model and report the ones that fail,
    /// sorted by model key.
    pub fn check_chains(&self) -> Vec<(String, ResolveError)> {
        let mut keys: Vec<&String> = self.definitions.keys().collect();
        keys.sort();
        keys.into_iter()
            .filter_map(|key| {
                resolve_chain(key, self)
                    .err()
                    .map(|err| (key.clone(), err))
            })
            .collect()
    }
}

impl DefinitionLookup for Catalog {
    fn lookup(&self, model: &str) -> Option<VirtualModelDefinition> {
        self.definitions.get(model).cloned()
    }
}

#[async_trait]
impl AsyncDefinitionLookup for Catalog {
    async fn lookup(&self, model: &str) -> Result<Option<VirtualModelDefinition>, LookupError> {
        Ok(self.definitions.get(model).cloned())
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), CatalogError> {
    let io_err = |source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else if DefinitionFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }
    Ok(())
}
