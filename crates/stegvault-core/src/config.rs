//! Explicit cryptographic configuration.
//!
//! Cost parameters are part of the backup format: a stego image can only be
//! restored with the same values it was created with. Nothing here is global;
//! callers build a [`CryptoConfig`] and hand it to the key derivation
//! constructor.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StegVaultError};

/// Argon2id time cost (iterations).
pub const DEFAULT_TIME_COST: u32 = 3;

/// Argon2id memory cost in KiB (64 MiB).
pub const DEFAULT_MEMORY_COST: u32 = 64 * 1024;

/// Argon2id lanes.
pub const DEFAULT_PARALLELISM: u32 = 4;

/// Key derivation cost settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    pub argon2_time_cost: u32,
    pub argon2_memory_cost: u32,
    pub argon2_parallelism: u32,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            argon2_time_cost: DEFAULT_TIME_COST,
            argon2_memory_cost: DEFAULT_MEMORY_COST,
            argon2_parallelism: DEFAULT_PARALLELISM,
        }
    }
}

impl CryptoConfig {
    /// Check the values against what Argon2 accepts.
    ///
    /// Memory must be at least `8 * parallelism` KiB, time cost at least 1,
    /// and parallelism between 1 and 2^24 - 1.
    pub fn validate(&self) -> Result<()> {
        if self.argon2_time_cost < argon2::Params::MIN_T_COST {
            return Err(StegVaultError::KeyDerivation(format!(
                "argon2_time_cost must be at least {}",
                argon2::Params::MIN_T_COST
            )));
        }
        if self.argon2_parallelism < argon2::Params::MIN_P_COST
            || self.argon2_parallelism > argon2::Params::MAX_P_COST
        {
            return Err(StegVaultError::KeyDerivation(format!(
                "argon2_parallelism must be between {} and {}",
                argon2::Params::MIN_P_COST,
                argon2::Params::MAX_P_COST
            )));
        }
        let min_memory = 8 * self.argon2_parallelism;
        if self.argon2_memory_cost < min_memory {
            return Err(StegVaultError::KeyDerivation(format!(
                "argon2_memory_cost must be at least {} KiB for parallelism {}",
                min_memory, self.argon2_parallelism
            )));
        }
        Ok(())
    }
}
