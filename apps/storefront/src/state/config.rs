//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`GREENCART_*`)
//! 2. Defaults (this file)
//!
//! Values that fail to parse are ignored and the default is kept.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::time::Duration;

use greencart_core::session::HashParams;
use greencart_core::Money;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (header, receipts)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Simulated delay after commands that change state.
    /// Zero disables it.
    pub latency_ms: u64,

    /// Argon2 memory cost in KiB
    #[serde(skip)]
    pub hash_memory_kib: u32,

    /// Argon2 iterations
    #[serde(skip)]
    pub hash_iterations: u32,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "GreenCart"
    /// - Currency: USD ($)
    /// - Latency: none
    /// - Hashing: argon2 library defaults
    fn default() -> Self {
        let hash = HashParams::default();
        ConfigState {
            store_name: "GreenCart".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            latency_ms: 0,
            hash_memory_kib: hash.memory_kib,
            hash_iterations: hash.iterations,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `GREENCART_STORE_NAME`: Override store name
    /// - `GREENCART_CURRENCY_SYMBOL`: Override currency symbol
    /// - `GREENCART_LATENCY_MS`: Simulated delay in milliseconds
    /// - `GREENCART_HASH_MEMORY_KIB`: Argon2 memory cost
    /// - `GREENCART_HASH_ITERATIONS`: Argon2 iterations
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("GREENCART_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("GREENCART_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(ms) = lookup("GREENCART_LATENCY_MS").and_then(|v| v.trim().parse().ok()) {
            config.latency_ms = ms;
        }

        if let Some(kib) = lookup("GREENCART_HASH_MEMORY_KIB").and_then(|v| v.trim().parse().ok()) {
            config.hash_memory_kib = kib;
        }

        if let Some(t) = lookup("GREENCART_HASH_ITERATIONS").and_then(|v| v.trim().parse().ok()) {
            config.hash_iterations = t;
        }

        config
    }

    /// Cheapest hashing and no delay, for tests.
    pub fn for_tests() -> Self {
        ConfigState {
            latency_ms: 0,
            hash_memory_kib: HashParams::MINIMAL.memory_kib,
            hash_iterations: HashParams::MINIMAL.iterations,
            ..ConfigState::default()
        }
    }

    pub fn hash_params(&self) -> HashParams {
        HashParams {
            memory_kib: self.hash_memory_kib,
            iterations: self.hash_iterations,
        }
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use greencart_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }

    pub fn format_money(&self, amount: Money) -> String {
        self.format_currency(amount.cents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(999), "$9.99");
        assert_eq!(config.format_currency(0), "$0.00");
        assert_eq!(config.format_currency(-1500), "-$15.00");
    }

    #[test]
    fn test_format_money_with_custom_symbol() {
        let config = ConfigState::from_lookup(lookup(&[("GREENCART_CURRENCY_SYMBOL", "₦")]));
        assert_eq!(config.format_money(Money::from_cents(50_000)), "₦500.00");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            ("GREENCART_STORE_NAME", "Leafy"),
            ("GREENCART_LATENCY_MS", "250"),
            ("GREENCART_HASH_MEMORY_KIB", "1024"),
            ("GREENCART_HASH_ITERATIONS", "3"),
        ]));
        assert_eq!(config.store_name, "Leafy");
        assert_eq!(config.latency(), Duration::from_millis(250));
        assert_eq!(config.hash_params().memory_kib, 1024);
        assert_eq!(config.hash_params().iterations, 3);
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let config = ConfigState::from_lookup(lookup(&[
            ("GREENCART_LATENCY_MS", "soon"),
            ("GREENCART_HASH_ITERATIONS", "-1"),
        ]));
        let defaults = ConfigState::default();
        assert_eq!(config.latency_ms, 0);
        assert_eq!(config.hash_iterations, defaults.hash_iterations);
    }
}
