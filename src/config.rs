//! Application configuration from environment variables.
//!
//! Currency conversion uses a static rate table: rates are operator
//! configuration, not live market data. Compiled defaults cover the
//! supported display currencies.

use anyhow::Context;
use rust_decimal::Decimal;
use tracing::warn;

/// Runtime settings, read once at startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub currency_rates: CurrencyRates,
    /// Tax rate applied to the adjusted quote total
    pub tax_rate: Decimal,
    /// Days a quote stays open after creation
    pub quote_validity_days: i64,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Ok(Self {
            database_url,
            bind_addr,
            currency_rates: CurrencyRates::from_env(),
            tax_rate: env_decimal("TAX_RATE", Decimal::new(18, 2)),
            quote_validity_days: env_i64("QUOTE_VALIDITY_DAYS", 30),
        })
    }
}

/// Conversion rates from the base currency (INR) to display currencies
#[derive(Debug, Clone)]
pub struct CurrencyRates {
    pub inr: Decimal,
    pub usd: Decimal,
    pub eur: Decimal,
    pub gbp: Decimal,
}

impl CurrencyRates {
    /// Rate for a currency code.
    ///
    /// Unrecognized codes convert at 1:1 so a stale or mistyped preference
    /// degrades to base-currency amounts instead of failing the request.
    pub fn rate_for(&self, code: &str) -> Decimal {
        match code.to_ascii_uppercase().as_str() {
            "INR" => self.inr,
            "USD" => self.usd,
            "EUR" => self.eur,
            "GBP" => self.gbp,
            _ => Decimal::ONE,
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            inr: env_decimal("FX_RATE_INR", defaults.inr),
            usd: env_decimal("FX_RATE_USD", defaults.usd),
            eur: env_decimal("FX_RATE_EUR", defaults.eur),
            gbp: env_decimal("FX_RATE_GBP", defaults.gbp),
        }
    }
}

impl Default for CurrencyRates {
    fn default() -> Self {
        Self {
            inr: Decimal::ONE,
            usd: Decimal::new(12, 3),  // 0.012
            eur: Decimal::new(11, 3),  // 0.011
            gbp: Decimal::new(95, 4),  // 0.0095
        }
    }
}

fn env_decimal(key: &str, default: Decimal) -> Decimal {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid decimal in {}, using default {}", key, default);
            default
        }),
        Err(_) => default,
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid integer in {}, using default {}", key, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_rate_table() {
        let rates = CurrencyRates::default();
        assert_eq!(rates.rate_for("INR"), dec!(1));
        assert_eq!(rates.rate_for("USD"), dec!(0.012));
        assert_eq!(rates.rate_for("EUR"), dec!(0.011));
        assert_eq!(rates.rate_for("GBP"), dec!(0.0095));
    }

    #[test]
    fn test_rate_for_is_case_insensitive() {
        let rates = CurrencyRates::default();
        assert_eq!(rates.rate_for("usd"), dec!(0.012));
        assert_eq!(rates.rate_for("Gbp"), dec!(0.0095));
    }

    #[test]
    fn test_unknown_currency_falls_back_to_one() {
        let rates = CurrencyRates::default();
        assert_eq!(rates.rate_for("JPY"), dec!(1));
        assert_eq!(rates.rate_for(""), dec!(1));
    }
}
