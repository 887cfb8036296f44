//! Configuration storage adapters.
//!
//! Both implement [`ConfigPort`]:
//!
//! - [`JsonConfigFile`]: a human-edited JSON file (`serde_json`).
//! - [`MemoryConfigStore`]: compact `postcard` bytes kept in memory, for
//!   tests and for runs with no file system.
//!
//! Every load and save goes through [`validate_config`]; invalid values are
//! rejected, never clamped.

use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::{info, warn};

use crate::app::ports::ConfigPort;
use crate::config::{RobotConfig, validate_config};
use crate::error::ConfigError;

// ───────────────────────────────────────────────────────────────
// JSON file
// ───────────────────────────────────────────────────────────────

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Parse and validate a JSON config document.
pub fn parse_json(text: &str) -> Result<RobotConfig, ConfigError> {
    let cfg: RobotConfig = serde_json::from_str(text).map_err(|e| {
        warn!("Config JSON rejected: {}", e);
        ConfigError::Corrupted
    })?;
    validate_config(&cfg)?;
    Ok(cfg)
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<RobotConfig, ConfigError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("JsonConfigFile: {} not found, using defaults", self.path.display());
                return Ok(RobotConfig::default());
            }
            Err(e) => {
                warn!("JsonConfigFile: read {} failed: {}", self.path.display(), e);
                return Err(ConfigError::IoError);
            }
        };
        let cfg = parse_json(&text)?;
        info!("JsonConfigFile: loaded {}", self.path.display());
        Ok(cfg)
    }

    fn save(&self, config: &RobotConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        let text = serde_json::to_string_pretty(config).map_err(|_| ConfigError::Corrupted)?;
        std::fs::write(&self.path, text).map_err(|e| {
            warn!("JsonConfigFile: write {} failed: {}", self.path.display(), e);
            ConfigError::IoError
        })?;
        info!("JsonConfigFile: saved {}", self.path.display());
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// In-memory postcard store
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    blob: RefCell<Option<Vec<u8>>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw bytes, bypassing validation.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            blob: RefCell::new(Some(bytes)),
        }
    }

    /// Stored encoding, if any.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.blob.borrow().clone()
    }
}

impl ConfigPort for MemoryConfigStore {
    fn load(&self) -> Result<RobotConfig, ConfigError> {
        let Some(bytes) = self.blob.borrow().clone() else {
            info!("MemoryConfigStore: empty, using defaults");
            return Ok(RobotConfig::default());
        };
        let cfg: RobotConfig = postcard::from_bytes(&bytes).map_err(|_| ConfigError::Corrupted)?;
        validate_config(&cfg)?;
        Ok(cfg)
    }

    fn save(&self, config: &RobotConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::Corrupted)?;
        *self.blob.borrow_mut() = Some(bytes);
        Ok(())
    }
}
