//! PIN CLI commands
//!
//! Set, remove and check the PIN that gates access to the journal data.

use clap::Subcommand;
use zeroize::Zeroizing;

use crate::crypto::PinCode;
use crate::error::{NestError, NestResult};
use crate::services::PersistenceService;
use crate::storage::{FlagStore, KeyValueStore};

/// PIN management commands
#[derive(Subcommand)]
pub enum PinCommands {
    /// Set or replace the PIN
    Set {
        /// New PIN (prompted twice when omitted)
        new_pin: Option<String>,
    },

    /// Remove the PIN (requires the current PIN)
    Remove,

    /// Check a PIN against the stored one
    Verify {
        /// PIN to check (prompted when omitted)
        candidate: Option<String>,
    },

    /// Show whether a PIN is configured
    Status,
}

/// Handle PIN commands
pub fn handle_pin_command<K: KeyValueStore, F: FlagStore>(
    service: &PersistenceService<K, F>,
    current_pin: Option<&str>,
    cmd: PinCommands,
) -> NestResult<()> {
    require_persistable(service)?;

    match cmd {
        PinCommands::Set { new_pin } => set_pin(service, current_pin, new_pin),
        PinCommands::Remove => remove_pin(service, current_pin),
        PinCommands::Verify { candidate } => verify_pin(service, candidate),
        PinCommands::Status => {
            if service.has_pin() {
                println!("PIN protection: ENABLED");
            } else {
                println!("PIN protection: DISABLED");
                println!("Run 'nestbook pin set' to protect your journal.");
            }
            Ok(())
        }
    }
}

/// Session gate: succeed when no PIN is set or the supplied/prompted PIN matches
pub fn unlock<K: KeyValueStore, F: FlagStore>(
    service: &PersistenceService<K, F>,
    supplied: Option<&str>,
) -> NestResult<()> {
    if !service.has_pin() {
        return Ok(());
    }

    let candidate = match supplied {
        Some(pin) => Zeroizing::new(pin.to_string()),
        None => prompt_pin("Enter PIN: ")?,
    };

    if service.verify_pin(&candidate) {
        Ok(())
    } else {
        Err(NestError::Validation("Incorrect PIN".into()))
    }
}

pub(crate) fn require_persistable<K: KeyValueStore, F: FlagStore>(
    service: &PersistenceService<K, F>,
) -> NestResult<()> {
    if service.is_persistable() {
        Ok(())
    } else {
        Err(NestError::Unavailable(
            "durable storage is not available; nothing can be saved".into(),
        ))
    }
}

fn set_pin<K: KeyValueStore, F: FlagStore>(
    service: &PersistenceService<K, F>,
    current_pin: Option<&str>,
    new_pin: Option<String>,
) -> NestResult<()> {
    // Replacing an existing PIN needs the old one
    unlock(service, current_pin)?;

    let pin = match new_pin {
        Some(pin) => PinCode::parse(pin)?,
        None => prompt_new_pin()?,
    };

    service.set_pin(pin.as_str());
    println!("PIN set.");
    Ok(())
}

fn remove_pin<K: KeyValueStore, F: FlagStore>(
    service: &PersistenceService<K, F>,
    current_pin: Option<&str>,
) -> NestResult<()> {
    if !service.has_pin() {
        println!("No PIN is set.");
        return Ok(());
    }

    unlock(service, current_pin)?;
    service.remove_pin();
    println!("PIN removed.");
    Ok(())
}

fn verify_pin<K: KeyValueStore, F: FlagStore>(
    service: &PersistenceService<K, F>,
    candidate: Option<String>,
) -> NestResult<()> {
    if !service.has_pin() {
        println!("No PIN is set.");
        return Ok(());
    }

    let candidate = match candidate {
        Some(pin) => Zeroizing::new(pin),
        None => prompt_pin("Enter PIN: ")?,
    };

    if service.verify_pin(&candidate) {
        println!("PIN is correct.");
        Ok(())
    } else {
        println!("PIN is incorrect.");
        Err(NestError::Validation("Incorrect PIN".into()))
    }
}

/// Prompt for a new PIN with confirmation
fn prompt_new_pin() -> NestResult<PinCode> {
    loop {
        let first = prompt_pin("Enter new PIN: ")?;
        let pin = match PinCode::parse(first.as_str()) {
            Ok(pin) => pin,
            Err(e) => {
                println!("{} Please try again.", e);
                continue;
            }
        };

        let second = prompt_pin("Confirm PIN: ")?;
        if pin.as_str() != second.as_str() {
            println!("PINs do not match. Please try again.");
            continue;
        }

        return Ok(pin);
    }
}

/// Prompt for a PIN (hidden input)
fn prompt_pin(prompt: &str) -> NestResult<Zeroizing<String>> {
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .map_err(|e| NestError::Io(format!("Failed to read PIN: {}", e)))
}
