//! Storage layer for nestbook
//!
//! Two substrates sit behind the environment guard: a durable async
//! key-value store for the snapshot and a synchronous flag store for the PIN
//! record and launch marker.

pub mod file_io;
pub mod flags;
pub mod guard;
pub mod kv;

pub use file_io::{read_json, write_json_atomic};
pub use flags::{FileFlagStore, FlagStore, MemoryFlagStore};
pub use guard::EnvironmentGuard;
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
