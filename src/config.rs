// src/config.rs
//
// Loads the persisted bot configuration, or collects it interactively on
// first run and writes it back out as `config.json`.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::Error;

pub const DEFAULT_PORT: u16 = 25565;

const CONFIG_FILE_NAME: &str = "config.json";

/// The one persistent record this program keeps. All three fields are
/// populated before the bot starts; the value is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    pub token: String,
    pub host: String,
    pub port: u16,
}

/// `config.json` next to the executable, or under the working directory if
/// the executable path cannot be resolved.
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}

/// Reads the config at `path`, falling back to interactive collection when
/// the file is missing or malformed. Load failures are recovered here and
/// never surfaced to the caller.
pub fn load<R: BufRead, W: Write>(
    path: &Path,
    input: &mut R,
    output: &mut W,
) -> Result<BotConfig, Error> {
    match std::fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str::<BotConfig>(&raw) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Config at {} is malformed ({e}); starting setup.", path.display());
                collect(path, input, output)
            }
        },
        Err(e) => {
            info!("No config file at {} ({e}); starting setup.", path.display());
            collect(path, input, output)
        }
    }
}

/// Prompts for token, host and port in that order, persists the result to
/// `path` as pretty-printed JSON, then returns it. Empty or non-numeric
/// port input falls back to 25565 without raising.
pub fn collect<R: BufRead, W: Write>(
    path: &Path,
    input: &mut R,
    output: &mut W,
) -> Result<BotConfig, Error> {
    let token = ask(input, output, "Enter your Discord bot token > ")?;
    let host = ask(input, output, "Enter your Minecraft server IP > ")?;
    let port_raw = ask(input, output, "Enter your Minecraft server port (default: 25565) > ")?;
    let port = port_raw.parse::<u16>().unwrap_or(DEFAULT_PORT);

    let config = BotConfig { token, host, port };
    persist(path, &config)?;
    info!("Configuration saved to {}", path.display());
    Ok(config)
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String, Error> {
    write!(output, "{prompt}")
        .and_then(|()| output.flush())
        .map_err(|e| Error::ConfigInput(format!("console write failed: {e}")))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| Error::ConfigInput(format!("console read failed: {e}")))?;
    if read == 0 {
        return Err(Error::ConfigInput("console input closed".into()));
    }
    Ok(line.trim().to_string())
}

fn persist(path: &Path, config: &BotConfig) -> Result<(), Error> {
    let raw = serde_json::to_string_pretty(config)
        .map_err(|e| Error::ConfigPersist(format!("serialize failed: {e}")))?;
    std::fs::write(path, raw)
        .map_err(|e| Error::ConfigPersist(format!("write to {} failed: {e}", path.display())))
}
