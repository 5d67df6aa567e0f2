//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the persistence service.

pub mod data;
pub mod pin;

pub use data::{
    clear_all, export_snapshot, import_snapshot, init_config, mark_launched, show_status,
};
pub use pin::{handle_pin_command, unlock, PinCommands};
