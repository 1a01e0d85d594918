//! Device key-value storage and the typed preferences built on it.

pub mod memory;
pub mod prefs;
pub mod sqlite;

use crate::app::Result;

pub use memory::MemoryKvStore;
pub use prefs::PreferenceStore;
pub use sqlite::SqliteKvStore;

/// String key-value storage. Keys are independent; writing the same key
/// twice keeps the last value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}
