//! nestbook - local persistence for a child journal
//!
//! Stores one snapshot of all journal data (profile, diary, growth,
//! vaccines, milestones, calendar events, medical history, documents),
//! gates access behind a PIN and tracks first-launch state.
//!
//! The stored snapshot is obfuscated, not encrypted: the key is a constant
//! shipped with the crate.
//!
//! # Architecture
//!
//! - `config`: Path resolution and store configuration
//! - `error`: Custom error types
//! - `crypto`: Snapshot obfuscation codec and PIN encoding
//! - `models`: The snapshot and its records
//! - `storage`: Environment guard, durable key-value store, flag store
//! - `services`: The persistence facade
//! - `export`: JSON/YAML dumps of the snapshot
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `nestbook` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use nestbook::config::{NestPaths, StoreConfig};
//! use nestbook::services::PersistenceService;
//!
//! let paths = NestPaths::new()?;
//! let service = PersistenceService::open_default(&paths, StoreConfig::load_or_default(&paths)?);
//! if let Some(snapshot) = service.load_data().await {
//!     println!("{}", snapshot.profile.name);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{NestError, NestResult};
pub use models::Snapshot;
pub use services::PersistenceService;
