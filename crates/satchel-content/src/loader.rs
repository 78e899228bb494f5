//! RON item definition loader

use crate::error::{Error, Result};
use satchel_core::ItemDefinition;
use std::fs;
use std::path::Path;

/// Authored item definitions, in load order.
///
/// Load order matters downstream: a database build assigns stable ids by
/// position, so loaders keep files and entries in a deterministic order.
#[derive(Debug, Default)]
pub struct ItemLibrary {
    items: Vec<ItemDefinition>,
}

impl ItemLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// The loaded definitions, in load order
    pub fn items(&self) -> &[ItemDefinition] {
        &self.items
    }

    /// Find a definition by display name
    pub fn get(&self, name: &str) -> Option<&ItemDefinition> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Number of loaded definitions
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the library is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Hand the definitions over, e.g. to a database build
    pub fn into_items(self) -> Vec<ItemDefinition> {
        self.items
    }
}

/// Loader for RON item definition files
pub struct Loader {
    library: ItemLibrary,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            library: ItemLibrary::new(),
        }
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        self.load_str(&content)?;

        log::debug!("loaded item definitions from {}", path.display());
        Ok(())
    }

    /// Load definitions from a RON string
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        #[derive(serde::Deserialize)]
        struct ItemFile {
            items: Vec<ItemDefinition>,
        }

        let file: ItemFile = ron::from_str(content)?;
        for item in file.items {
            if self.library.get(&item.name).is_some() {
                return Err(Error::DuplicateDefinition(item.name));
            }
            self.library.items.push(item);
        }
        Ok(())
    }

    /// Load every `.ron` file in a directory, in file-name order
    pub fn load_dir(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let mut files: Vec<_> = fs::read_dir(path.as_ref())?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
            .collect();
        files.sort();

        for file in files {
            self.load_file(&file)?;
        }

        log::info!(
            "content directory {} loaded, {} item definition(s) total",
            path.as_ref().display(),
            self.library.len()
        );
        Ok(())
    }

    /// The definitions loaded so far
    pub fn library(&self) -> &ItemLibrary {
        &self.library
    }

    /// Finish loading and hand over the library
    pub fn into_library(self) -> ItemLibrary {
        self.library
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
