//! Engine configuration
//!
//! Loaded from RON. Every field is optional; missing fields take the
//! defaults below.
//!
//! ```ron
//! (
//!     strict: true,
//!     rng_seed: 42,
//!     tip_slots: 45,
//!     default_tip_time: 105,
//! )
//! ```

use crate::error::{Error, Result};
use rts_core::TIP_SLOTS;
use rts_script::{CompileOptions, DEFAULT_TIP_TIME};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Seed used when the configuration does not give one
pub const DEFAULT_RNG_SEED: u64 = 12345;

/// Configuration for an [`Engine`](crate::Engine)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Unknown primitives are fatal instead of warnings
    pub strict: bool,
    /// Seed for `JUMP` chance rolls
    pub rng_seed: u64,
    /// Number of tip slots; clamped to at least one
    pub tip_slots: usize,
    /// Display time of a tip without an explicit time, in ticks
    pub default_tip_time: i32,
}

impl EngineConfig {
    /// Parse a RON configuration
    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read a RON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// The subset the compiler needs
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            strict: self.strict,
            default_tip_time: self.default_tip_time,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict: false,
            rng_seed: DEFAULT_RNG_SEED,
            tip_slots: TIP_SLOTS,
            default_tip_time: DEFAULT_TIP_TIME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lenient() {
        let config = EngineConfig::default();
        assert!(!config.strict);
        assert_eq!(config.tip_slots, TIP_SLOTS);
        assert_eq!(config.compile_options(), CompileOptions::default());
    }

    #[test]
    fn test_partial_ron() {
        let config = EngineConfig::from_ron("(strict: true, rng_seed: 9)").unwrap();
        assert!(config.strict);
        assert_eq!(config.rng_seed, 9);
        assert_eq!(config.default_tip_time, DEFAULT_TIP_TIME);
        assert!(config.compile_options().strict);
    }

    #[test]
    fn test_bad_ron() {
        let err = EngineConfig::from_ron("(strict: maybe)").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
