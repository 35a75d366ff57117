#![forbid(unsafe_code)]

pub mod repository;
pub mod snapshot;
pub mod sqlite;

pub use repository::{InMemoryRepository, SlotRepository, Storage, StorageError};
pub use snapshot::{SnapshotError, decode_snapshot, encode_snapshot};
