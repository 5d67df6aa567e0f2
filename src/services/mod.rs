//! Service layer for nestbook
//!
//! The persistence service is the single boundary between callers and the
//! storage substrates.

pub mod persistence;

pub use persistence::PersistenceService;
