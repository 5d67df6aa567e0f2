//! Configuration module for nestbook
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - Store naming and fixed logical keys

pub mod paths;
pub mod settings;

pub use paths::NestPaths;
pub use settings::StoreConfig;
