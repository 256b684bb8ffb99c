// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/difficulty.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file converts between the decimal share difficulty handed to miners
// and the 256-bit target exchanged on the wire, located in the core
// subdirectory of the proxy source tree. Both directions divide 2^256, so the
// arithmetic is done in 512-bit integers to keep 2^256 itself representable.

use log::debug;
use thiserror::Error;
use uint::construct_uint;

const LOG_TARGET: &str = "sha3x::proxy::difficulty";

construct_uint! {
    pub struct U512(8);
}

/// Fixed-point scale applied to a miner difficulty before it is divided into 2^256.
pub const DIFFICULTY_PRECISION: f64 = 100_000_000.0;

/// Largest target the protocol can carry, in bytes.
const TARGET_BYTES: usize = 32;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DifficultyError {
    #[error("Difficulty must be positive and finite, got {difficulty}")]
    NonPositiveDifficulty { difficulty: f64 },

    #[error("Difficulty {difficulty} is out of range once scaled")]
    DifficultyOutOfRange { difficulty: f64 },

    #[error("Malformed target hex: {target:?}")]
    MalformedTarget { target: String },

    #[error("Target {target:?} is wider than 256 bits")]
    TargetTooWide { target: String },

    #[error("Target must be non-zero")]
    ZeroTarget,
}

fn pow256() -> U512 {
    U512::one() << 256
}

/// Convert a miner difficulty into the "0x"-prefixed big-endian target hex.
///
/// The difficulty is scaled by 10^8 and truncated before dividing, and the
/// result is rendered with the minimal number of bytes.
pub fn difficulty_to_target(difficulty: f64) -> Result<String, DifficultyError> {
    if !difficulty.is_finite() || difficulty <= 0.0 {
        debug!(target: LOG_TARGET, "Rejecting difficulty {}", difficulty);
        return Err(DifficultyError::NonPositiveDifficulty { difficulty });
    }

    // Same evaluation order as the pool software that hands these targets out,
    // so float rounding of the scaled value matches bit for bit.
    let scaled = (difficulty * 1_000_000.0 * 100.0).trunc();
    if scaled < 1.0 || scaled >= u128::MAX as f64 {
        debug!(target: LOG_TARGET, "Difficulty {} scales to {}", difficulty, scaled);
        return Err(DifficultyError::DifficultyOutOfRange { difficulty });
    }

    let target = pow256() / U512::from(scaled as u128);
    let encoded = encode_hex(target);
    debug!(target: LOG_TARGET, "Difficulty {} -> target {}", difficulty, encoded);
    Ok(encoded)
}

/// Parse a target hex string and return `floor(2^256 / target)`.
///
/// This is the raw network-scale difficulty; it is not divided back by the
/// 10^8 precision factor. See [`target_to_share_difficulty`] for that.
pub fn target_to_difficulty(target_hex: &str) -> Result<U512, DifficultyError> {
    let target = decode_target(target_hex)?;
    Ok(pow256() / target)
}

/// Parse a target hex string back into a miner-facing decimal difficulty.
///
/// Lossy: both directions truncate, so for `d >= 1e-4` the round trip lands
/// within a relative 1e-4 of `d`.
pub fn target_to_share_difficulty(target_hex: &str) -> Result<f64, DifficultyError> {
    let raw = target_to_difficulty(target_hex)?;
    Ok(u512_to_f64(raw) / DIFFICULTY_PRECISION)
}

fn encode_hex(value: U512) -> String {
    let digits = format!("{:x}", value);
    if digits.len() % 2 == 1 {
        format!("0x0{}", digits)
    } else {
        format!("0x{}", digits)
    }
}

fn decode_target(target_hex: &str) -> Result<U512, DifficultyError> {
    let digits = target_hex
        .strip_prefix("0x")
        .or_else(|| target_hex.strip_prefix("0X"))
        .unwrap_or(target_hex);
    let padded;
    let digits = if digits.len() % 2 == 1 {
        padded = format!("0{}", digits);
        padded.as_str()
    } else {
        digits
    };

    let malformed = || DifficultyError::MalformedTarget {
        target: target_hex.to_string(),
    };
    if digits.is_empty() {
        return Err(malformed());
    }
    let bytes = hex::decode(digits).map_err(|_| malformed())?;

    let first_significant = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let significant = &bytes[first_significant..];
    if significant.len() > TARGET_BYTES {
        return Err(DifficultyError::TargetTooWide {
            target: target_hex.to_string(),
        });
    }

    let target = U512::from_big_endian(significant);
    if target.is_zero() {
        debug!(target: LOG_TARGET, "Rejecting zero target {:?}", target_hex);
        return Err(DifficultyError::ZeroTarget);
    }
    Ok(target)
}

pub(crate) fn u512_to_f64(value: U512) -> f64 {
    value
        .0
        .iter()
        .rev()
        .fold(0.0, |acc, word| acc * 18_446_744_073_709_551_616.0 + *word as f64)
}


// Changelog:
// - v2.0.0 (2025-07-02): Reworked for the proxy.
//   - Replaced the SHA3x/SHA-256 difficulty helpers with the target codec
//     used when assigning share difficulty to connected miners.
//   - Moved to 512-bit arithmetic so 2^256 is exact; errors are returned to
//     the caller instead of falling back to a default difficulty.
// - v1.2.10 (2025-06-19): Fixed SHA-256 target calculation for share validation.
