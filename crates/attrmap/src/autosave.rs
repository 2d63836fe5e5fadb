//! A JSON-file-backed map that persists after every mutation.

use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::map::AttrMap;
use crate::value::Value;

/// An [`AttrMap`] bound to a JSON file.
///
/// Every mutating operation writes the file back while autosave is enabled
/// (the default). Reads go straight to the in-memory map; the struct derefs
/// to [`AttrMap`], so the whole read API is available directly.
///
/// Mutation is only possible through the persisting methods on this type —
/// there is no `DerefMut` — so the file can never silently drift from the
/// in-memory state while autosave is on.
#[derive(Debug)]
pub struct AutosaveMap {
    path: PathBuf,
    autosave: bool,
    data: AttrMap,
}

impl AutosaveMap {
    /// Opens the map at `path`, loading the file when it exists.
    ///
    /// A missing file is not an error; the map starts empty and the file is
    /// created on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open_with_defaults(path, AttrMap::new())
    }

    /// Opens the map at `path` with `defaults` filled in first.
    ///
    /// Entries loaded from the file are merged over the defaults, so file
    /// contents win; defaults only surface for keys the file does not have.
    pub fn open_with_defaults(
        path: impl Into<PathBuf>,
        defaults: impl Into<AttrMap>,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        let mut data = defaults.into();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let loaded: AttrMap = serde_json::from_str(&content)?;
            data.merge(loaded);
        }
        Ok(Self {
            path,
            autosave: true,
            data,
        })
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn autosave(&self) -> bool {
        self.autosave
    }

    /// Turns automatic persistence on or off.
    ///
    /// While off, mutations stay in memory until [`store`](AutosaveMap::store)
    /// is called.
    pub fn set_autosave(&mut self, enabled: bool) {
        self.autosave = enabled;
    }

    /// Writes the current contents to the backing file.
    pub fn store(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Replaces the in-memory contents with what the file holds.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        let content = fs::read_to_string(&self.path)?;
        self.data = serde_json::from_str(&content)?;
        Ok(())
    }

    fn save_if_enabled(&self) -> Result<(), StoreError> {
        if self.autosave {
            self.store()?;
        }
        Ok(())
    }

    /// Sets `key`, persisting when autosave is enabled.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<(), StoreError> {
        self.data.set(key, value);
        self.save_if_enabled()
    }

    /// Sets the entry behind attribute `name`, persisting when enabled.
    pub fn set_attr(&mut self, name: &str, value: impl Into<Value>) -> Result<(), StoreError> {
        self.data.set_attr(name, value);
        self.save_if_enabled()
    }

    /// Removes `key`, persisting when the map changed and autosave is enabled.
    pub fn remove(&mut self, key: &str) -> Result<Option<Value>, StoreError> {
        let removed = self.data.remove(key);
        if removed.is_some() {
            self.save_if_enabled()?;
        }
        Ok(removed)
    }

    /// Removes the entry behind attribute `name`, persisting when enabled.
    pub fn remove_attr(&mut self, name: &str) -> Result<Value, StoreError> {
        let removed = self.data.remove_attr(name)?;
        self.save_if_enabled()?;
        Ok(removed)
    }

    /// Merges `source` in, persisting when enabled.
    pub fn merge(&mut self, source: impl Into<AttrMap>) -> Result<(), StoreError> {
        self.data.merge(source);
        self.save_if_enabled()
    }

    /// Removes every entry, persisting when enabled.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.data.clear();
        self.save_if_enabled()
    }
}

impl Deref for AutosaveMap {
    type Target = AttrMap;

    fn deref(&self) -> &AttrMap {
        &self.data
    }
}
