// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/format.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file provides utility functions for formatting proxy statistics in
// log lines, located in the utils subdirectory.
//
// Tree Location:
// - src/utils/format.rs (formatting utilities)
// - Depends on: std

use std::time::Duration;

/// Utility functions for formatting proxy statistics
pub struct FormatUtils;

impl FormatUtils {
    /// Format hashrate in appropriate units (H/s, KH/s, MH/s, GH/s, TH/s)
    pub fn format_hashrate(hashrate: f64) -> String {
        if hashrate >= 1_000_000_000_000.0 {
            format!("{:.2} TH/s", hashrate / 1_000_000_000_000.0)
        } else if hashrate >= 1_000_000_000.0 {
            format!("{:.2} GH/s", hashrate / 1_000_000_000.0)
        } else if hashrate >= 1_000_000.0 {
            format!("{:.2} MH/s", hashrate / 1_000_000.0)
        } else if hashrate >= 1_000.0 {
            format!("{:.2} KH/s", hashrate / 1_000.0)
        } else {
            format!("{:.2} H/s", hashrate)
        }
    }

    /// Format an age for human-readable output (seconds, minutes, hours)
    pub fn format_age(age: Duration) -> String {
        let secs = age.as_secs();
        if secs < 60 {
            format!("{}s ago", secs)
        } else if secs < 3600 {
            format!("{}m ago", secs / 60)
        } else {
            format!("{}h ago", secs / 3600)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hashrate_units() {
        assert_eq!(FormatUtils::format_hashrate(12.0), "12.00 H/s");
        assert_eq!(FormatUtils::format_hashrate(2_500.0), "2.50 KH/s");
        assert_eq!(FormatUtils::format_hashrate(31_000_000.0), "31.00 MH/s");
        assert_eq!(FormatUtils::format_hashrate(4_200_000_000_000.0), "4.20 TH/s");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(FormatUtils::format_age(Duration::from_secs(42)), "42s ago");
        assert_eq!(FormatUtils::format_age(Duration::from_secs(600)), "10m ago");
        assert_eq!(FormatUtils::format_age(Duration::from_secs(7300)), "2h ago");
    }
}

// Changelog:
// - v1.1.0 (2025-07-02): Added TH/s; duration formatting renamed to format_age
//   since it is only used for "last seen" style output.
// - v1.0.0 (2025-06-14): Extracted from monolithic main.rs.
