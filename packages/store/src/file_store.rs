//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that persists each key
//! as one file under a base directory. It is used on mobile and desktop
//! builds to keep the session, push token and cached parcel lists across app
//! restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── user                 # session profile JSON
//! ├── fcmToken
//! ├── fcmTokenSynced
//! └── all_parcels_driver   # cached parcel list JSON
//! ```
//!
//! ## Platform data directories
//!
//! Use [`dirs::data_dir()`] to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/courier/` |
//! | Linux | `~/.local/share/courier/` |
//! | Android | App-internal storage (via `dirs`) |
//!
//! Writes go to a `<key>.tmp` file that is then renamed over the key's file.
//! I/O errors are logged and swallowed: a failed read is a missing key, a
//! failed write leaves the previous value.

use std::path::PathBuf;

use crate::cache::KeyValueStore;

/// Filesystem-backed KeyValueStore for mobile and desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Keys map to file names; anything outside `[A-Za-z0-9_-]` becomes `_`.
    fn key_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.base.join(name)
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    async fn set(&self, key: &str, value: String) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!(key, error = %e, "failed to create store directory");
            return;
        }
        // Written beside the target and renamed over it, so readers see the
        // old value or the new one, never a partial file.
        let path = self.key_path(key);
        let staging = path.with_extension("tmp");
        if let Err(e) = std::fs::write(&staging, value) {
            tracing::warn!(key, error = %e, "failed to write store value");
            let _ = std::fs::remove_file(&staging);
            return;
        }
        if let Err(e) = std::fs::rename(&staging, &path) {
            tracing::warn!(key, error = %e, "failed to replace store value");
            let _ = std::fs::remove_file(&staging);
        }
    }

    async fn remove(&self, key: &str) {
        let path = self.key_path(key);
        if path.exists() {
            if let Err(e) = std::fs::remove_file(path) {
                tracing::warn!(key, error = %e, "failed to remove store value");
            }
        }
    }
}
