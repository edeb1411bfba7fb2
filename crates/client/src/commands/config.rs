// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ConfigCommand;

/// Effective configuration as TOML, with the resolved state directory.
pub fn render(config: &Config) -> Result<String> {
    let mut text = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
    if config.state_dir.is_none() {
        text.push_str(&format!("# state_dir = \"{}\"\n", config.state_dir().display()));
    }
    Ok(text)
}

pub fn run(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            println!("# {}", Config::default_path().display());
            print!("{}", render(&Config::resolve()?)?);
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
