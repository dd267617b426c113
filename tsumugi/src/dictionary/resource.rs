//! Named binary resources that a [`Dictionary`](super::Dictionary) is stored in.
//!
//! A dictionary is split into the following resources, each serialized with
//! bincode:
//!
//!  - [`TRIE`]: the surface trie of the system lexicon,
//!  - [`ENTRIES`]: connection ids, costs, and features of the system lexicon,
//!  - [`CHAR_DEF`]: character categories and unknown-word entries,
//!  - [`MATRIX`]: the connection cost matrix,
//!  - [`USER`]: the user lexicon (optional).
use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use crate::errors::{Result, TsumugiError};

/// Name of the trie resource.
pub const TRIE: &str = "trie.bin";
/// Name of the entry resource.
pub const ENTRIES: &str = "entries.bin";
/// Name of the character definition resource.
pub const CHAR_DEF: &str = "chardef.bin";
/// Name of the connection matrix resource.
pub const MATRIX: &str = "matrix.bin";
/// Name of the user lexicon resource.
pub const USER: &str = "user.bin";

/// Source of resource bytes by logical name.
pub trait ResourceResolver {
    /// Reads the whole resource, or returns `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// [`TsumugiError`] is returned when the resource exists but cannot be read.
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Reads a resource that must exist.
    ///
    /// # Errors
    ///
    /// [`TsumugiError::DictionaryLoad`] is returned when the resource is missing.
    fn read_required(&self, name: &str) -> Result<Vec<u8>> {
        self.read(name)?
            .ok_or_else(|| TsumugiError::dictionary_load(name, "the resource is missing."))
    }
}

/// Resolver reading files in a directory.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    dir: PathBuf,
}

impl DirectoryResolver {
    /// Creates a resolver of files in `dir`.
    pub fn new<P>(dir: P) -> Self
    where
        P: AsRef<Path>,
    {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Writes resources into the directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// [`TsumugiError`] is returned when a file cannot be written.
    pub fn write_all<'a, I>(&self, resources: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, Vec<u8>)>,
    {
        std::fs::create_dir_all(&self.dir)?;
        for (name, bytes) in resources {
            let path = self.dir.join(name);
            std::fs::write(&path, &bytes)?;
            tracing::info!(path = %path.display(), num_bytes = bytes.len(), "wrote a resource");
        }
        Ok(())
    }
}

impl ResourceResolver for DirectoryResolver {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.dir.join(name);
        match std::fs::read(&path) {
            Ok(bytes) => {
                tracing::debug!(path = %path.display(), num_bytes = bytes.len(), "read a resource");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TsumugiError::dictionary_load(name, e.to_string())),
        }
    }
}

/// Resolver holding resources in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a resource.
    pub fn insert<S>(&mut self, name: S, bytes: Vec<u8>)
    where
        S: Into<String>,
    {
        self.resources.insert(name.into(), bytes);
    }

    /// Removes a resource, returning its bytes if present.
    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.resources.remove(name)
    }
}

impl<S> FromIterator<(S, Vec<u8>)> for MemoryResolver
where
    S: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<u8>)>,
    {
        Self {
            resources: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl ResourceResolver for MemoryResolver {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.resources.get(name).cloned())
    }
}
