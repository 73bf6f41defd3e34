//! Device address resolution
//!
//! Sources are consulted in order; the first non-empty answer wins.

use colored::Colorize;
use dialoguer::Input;

use crate::error::{CliError, Result};

/// One place a device address may come from.
pub trait AddressSource {
    fn address(&self) -> Result<Option<String>>;
}

/// The positional command-line argument.
pub struct Argument(pub Option<String>);

impl AddressSource for Argument {
    fn address(&self) -> Result<Option<String>> {
        Ok(self.0.clone())
    }
}

/// An environment variable, `ESP32_IP` by default.
pub struct EnvVar(pub String);

impl AddressSource for EnvVar {
    fn address(&self) -> Result<Option<String>> {
        Ok(std::env::var(&self.0).ok())
    }
}

/// Ask the operator on the terminal.
pub struct Prompt;

impl AddressSource for Prompt {
    fn address(&self) -> Result<Option<String>> {
        println!("{}", "ESP32 Overwatch - Config Backup".bold());
        let answer: String = Input::new()
            .with_prompt("IP address of your ESP32 device")
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(answer))
    }
}

/// Return the first non-blank address, trimmed.
pub fn resolve(sources: &[&dyn AddressSource]) -> Result<String> {
    for source in sources {
        if let Some(address) = source.address()? {
            let trimmed = address.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
    }
    Err(CliError::user("IP address required"))
}
