use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use super::errors::NameStoreError;
use super::persistence::{RawNames, read_names_file, write_names_file};
use crate::desktop::{WindowDirectory, WindowHandle};

/// User-chosen window names, keyed by handle and persisted as JSON.
#[derive(Clone)]
pub struct NameStore {
    path: PathBuf,
    directory: WindowDirectory,
    names: BTreeMap<WindowHandle, String>,
    pruned: usize,
    load_error: Option<String>,
}

impl NameStore {
    /// Load the names file and drop entries whose window is gone.
    ///
    /// If anything was dropped the pruned mapping is written back right away.
    /// An unreadable or corrupted file yields an empty store with
    /// [`load_error`](Self::load_error) set rather than an error; a missing
    /// file is simply empty.
    pub fn load(path: impl Into<PathBuf>, directory: WindowDirectory) -> Self {
        let path = path.into();
        let mut store = Self {
            path,
            directory,
            names: BTreeMap::new(),
            pruned: 0,
            load_error: None,
        };

        let raw = match read_names_file(&store.path) {
            Ok(Some(raw)) => raw,
            Ok(None) => return store,
            Err(e) => {
                error!(
                    event = "core.names.load_failed",
                    path = %store.path.display(),
                    error = %e
                );
                store.load_error = Some(format!(
                    "{}. Starting with no window names; the file will be overwritten on the next rename.",
                    e
                ));
                return store;
            }
        };

        let total = raw.len();
        store.names = store.reconcile(raw);
        store.pruned = total - store.names.len();

        if store.pruned > 0 {
            warn!(
                event = "core.names.stale_entries_removed",
                path = %store.path.display(),
                removed = store.pruned,
                kept = store.names.len()
            );
            if let Err(e) = store.save() {
                error!(
                    event = "core.names.prune_save_failed",
                    path = %store.path.display(),
                    error = %e
                );
                store.load_error = Some(e.to_string());
            }
        }

        info!(
            event = "core.names.loaded",
            path = %store.path.display(),
            count = store.names.len()
        );
        store
    }

    fn reconcile(&self, raw: RawNames) -> BTreeMap<WindowHandle, String> {
        raw.into_iter()
            .filter_map(|(key, name)| match key.parse::<WindowHandle>() {
                Ok(handle) if self.directory.is_live(handle) => Some((handle, name)),
                Ok(_) => None,
                Err(_) => {
                    warn!(event = "core.names.invalid_key_dropped", key = %key);
                    None
                }
            })
            .collect()
    }

    /// Write the full mapping to disk.
    pub fn save(&self) -> Result<(), NameStoreError> {
        let raw: RawNames = self
            .names
            .iter()
            .map(|(handle, name)| (handle.to_string(), name.clone()))
            .collect();
        write_names_file(&self.path, &raw)
    }

    /// Assign a name to a live window and persist it.
    pub fn rename(
        &mut self,
        handle: WindowHandle,
        new_name: impl Into<String>,
    ) -> Result<(), NameStoreError> {
        if !self.directory.is_live(handle) {
            return Err(NameStoreError::InvalidHandle { handle });
        }

        let new_name = new_name.into();
        let previous = self.names.insert(handle, new_name.clone());
        if let Err(e) = self.save() {
            // Keep memory in line with what's on disk.
            match previous {
                Some(previous) => self.names.insert(handle, previous),
                None => self.names.remove(&handle),
            };
            return Err(e);
        }

        info!(event = "core.names.renamed", handle = %handle, name = %new_name);
        Ok(())
    }

    /// Stored names containing `query`, case-insensitively, ordered by handle.
    pub fn find_by_name_substring(&self, query: &str) -> Vec<(String, WindowHandle)> {
        let query = query.to_lowercase();
        self.names
            .iter()
            .filter(|(_, name)| name.to_lowercase().contains(&query))
            .map(|(handle, name)| (name.clone(), *handle))
            .collect()
    }

    pub fn name_of(&self, handle: WindowHandle) -> Option<&str> {
        self.names.get(&handle).map(String::as_str)
    }

    pub fn names(&self) -> &BTreeMap<WindowHandle, String> {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries dropped by reconciliation during load.
    pub fn pruned(&self) -> usize {
        self.pruned
    }

    /// Why the file could not be used, if it couldn't.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::test_helpers::FakeDesktop;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        path: PathBuf,
        fake: Arc<FakeDesktop>,
    }

    impl Fixture {
        fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("window_names.json");
            Self {
                _temp_dir: temp_dir,
                path,
                fake: Arc::new(FakeDesktop::new()),
            }
        }

        fn directory(&self) -> WindowDirectory {
            WindowDirectory::new(self.fake.clone())
        }

        fn load(&self) -> NameStore {
            NameStore::load(&self.path, self.directory())
        }

        fn file_json(&self) -> serde_json::Value {
            serde_json::from_str(&std::fs::read_to_string(&self.path).unwrap()).unwrap()
        }
    }

    fn h(raw: isize) -> WindowHandle {
        WindowHandle::from_raw(raw)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let fixture = Fixture::new();
        let store = fixture.load();
        assert!(store.is_empty());
        assert_eq!(store.pruned(), 0);
        assert!(store.load_error().is_none());
        assert!(!fixture.path.exists());
    }

    #[test]
    fn test_load_drops_dead_handle_and_rewrites_file() {
        let fixture = Fixture::new();
        std::fs::write(&fixture.path, r#"{"12345": "Notepad"}"#).unwrap();

        let store = fixture.load();

        assert!(store.is_empty());
        assert_eq!(store.pruned(), 1);
        assert_eq!(fixture.file_json(), serde_json::json!({}));
    }

    #[test]
    fn test_load_keeps_live_handles_without_rewrite() {
        let fixture = Fixture::new();
        fixture.fake.add_window(10, "Notepad");
        let original = "{\n    \"10\": \"notes\"\n}";
        std::fs::write(&fixture.path, original).unwrap();

        let store = fixture.load();

        assert_eq!(store.name_of(h(10)), Some("notes"));
        assert_eq!(store.pruned(), 0);
        assert_eq!(std::fs::read_to_string(&fixture.path).unwrap(), original);
    }

    #[test]
    fn test_load_drops_unparseable_keys() {
        let fixture = Fixture::new();
        fixture.fake.add_window(10, "Notepad");
        std::fs::write(&fixture.path, r#"{"10": "notes", "abc": "junk"}"#).unwrap();

        let store = fixture.load();

        assert_eq!(store.len(), 1);
        assert_eq!(store.pruned(), 1);
        assert_eq!(fixture.file_json(), serde_json::json!({"10": "notes"}));
    }

    #[test]
    fn test_load_corrupted_file_is_empty_with_error() {
        let fixture = Fixture::new();
        std::fs::write(&fixture.path, "{ this is not valid json }").unwrap();

        let store = fixture.load();

        assert!(store.is_empty());
        assert!(store.load_error().unwrap().contains("corrupted"));
        // Left alone until the user renames something.
        assert_eq!(
            std::fs::read_to_string(&fixture.path).unwrap(),
            "{ this is not valid json }"
        );
    }

    #[test]
    fn test_rename_persists_immediately() {
        let fixture = Fixture::new();
        fixture.fake.add_window(10, "Notepad");
        let mut store = fixture.load();

        store.rename(h(10), "notes").unwrap();

        assert_eq!(store.name_of(h(10)), Some("notes"));
        assert_eq!(fixture.file_json(), serde_json::json!({"10": "notes"}));
    }

    #[test]
    fn test_rename_overwrites_existing_name() {
        let fixture = Fixture::new();
        fixture.fake.add_window(10, "Notepad");
        let mut store = fixture.load();

        store.rename(h(10), "first").unwrap();
        store.rename(h(10), "second").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(fixture.file_json(), serde_json::json!({"10": "second"}));
    }

    #[test]
    fn test_rename_dead_handle_fails() {
        let fixture = Fixture::new();
        let mut store = fixture.load();

        let err = store.rename(h(99), "ghost").unwrap_err();
        assert!(matches!(err, NameStoreError::InvalidHandle { .. }));
        assert!(store.is_empty());
        assert!(!fixture.path.exists());
    }

    #[test]
    fn test_rename_save_failure_rolls_back() {
        let fixture = Fixture::new();
        fixture.fake.add_window(10, "Notepad");
        // A directory where the file should be makes the final rename fail.
        std::fs::create_dir_all(&fixture.path).unwrap();
        let mut store = NameStore::load(&fixture.path, fixture.directory());

        let err = store.rename(h(10), "notes").unwrap_err();
        assert!(matches!(err, NameStoreError::SaveFailed { .. }));
        assert!(store.name_of(h(10)).is_none());
    }

    #[test]
    fn test_save_load_round_trip_restricted_to_live() {
        let fixture = Fixture::new();
        fixture.fake.add_window(1, "a");
        fixture.fake.add_window(2, "b");
        fixture.fake.add_window(3, "c");
        let mut store = fixture.load();
        store.rename(h(1), "one").unwrap();
        store.rename(h(2), "two").unwrap();
        store.rename(h(3), "three").unwrap();

        fixture.fake.destroy_window(2);
        let reloaded = fixture.load();

        let expected: BTreeMap<WindowHandle, String> = [(h(1), "one"), (h(3), "three")]
            .into_iter()
            .map(|(handle, name)| (handle, name.to_string()))
            .collect();
        assert_eq!(reloaded.names(), &expected);
        assert_eq!(reloaded.pruned(), 1);
    }

    #[test]
    fn test_find_by_name_substring_case_insensitive_sorted_by_handle() {
        let fixture = Fixture::new();
        for raw in [30, 10, 20] {
            fixture.fake.add_window(raw, "w");
        }
        let mut store = fixture.load();
        store.rename(h(30), "Notepad main").unwrap();
        store.rename(h(10), "my NOTES").unwrap();
        store.rename(h(20), "browser").unwrap();

        let matches = store.find_by_name_substring("note");
        assert_eq!(
            matches,
            vec![
                ("my NOTES".to_string(), h(10)),
                ("Notepad main".to_string(), h(30)),
            ]
        );
        assert!(store.find_by_name_substring("xyz").is_empty());
    }
}
