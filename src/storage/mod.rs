//! Persistence for habitual.
//!  - [key_value::KeyValueStore] is a flat string store, one file per key on disk.
//!  - [store::Store] (de)serializes the collections as JSON arrays on top of it.
//!  - There is no schema version; the shapes live in [entities].

pub mod entities;
pub mod key_value;
pub mod store;

use std::path::Path;

use key_value::FileStore;
use store::Store;

/// Directory under the application directory that holds one file per store key.
pub const STORE_DIR: &str = "store";

pub fn open_file_store(application_dir: &Path) -> Result<Store<FileStore>, std::io::Error> {
    Ok(Store::new(FileStore::new(application_dir.join(STORE_DIR))?))
}
