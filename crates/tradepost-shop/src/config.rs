//! Shop configuration loading and typed config structures.
//!
//! Configuration is a plain value handed to the trade pipeline and the
//! offer-editing API; nothing here is process-global. The canonical file
//! format is YAML, mirrored one-to-one by these structs, with every field
//! defaulting to a sensible value so an empty file is a valid
//! configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use tradepost_currency::CurrencyConfig;
use tradepost_types::{ItemKind, ItemMatching};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level shop configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Currency denominations and thresholds.
    #[serde(default)]
    pub currency: CurrencyConfig,

    /// Trading policy settings.
    #[serde(default)]
    pub trading: TradingConfig,
}

impl ShopConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Serde default for [`TradingConfig::prevent_trading_with_own_shop`].
const fn default_true() -> bool {
    true
}

/// Serde default for [`TradingConfig::book_item`].
fn default_book_item() -> ItemKind {
    ItemKind::new("written_book")
}

/// Serde default for [`TradingConfig::blank_book_item`].
fn default_blank_book_item() -> ItemKind {
    ItemKind::new("writable_book")
}

/// Trading policy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingConfig {
    /// Whether the shop owner is barred from trading with their own shop.
    #[serde(default = "default_true")]
    pub prevent_trading_with_own_shop: bool,

    /// Whether trading is blocked while the shop owner is present.
    #[serde(default)]
    pub prevent_trading_while_owner_present: bool,

    /// Tax rate in percent, applied to every payout. 0 disables taxation.
    /// Values above 100 are treated as 100.
    #[serde(default)]
    pub tax_rate: u32,

    /// How presented cost items are compared against required ones.
    #[serde(default)]
    pub item_matching: ItemMatching,

    /// The item kind of a sellable written book.
    #[serde(default = "default_book_item")]
    pub book_item: ItemKind,

    /// The blank consumable a book shop uses up per trade.
    #[serde(default = "default_blank_book_item")]
    pub blank_book_item: ItemKind,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            prevent_trading_with_own_shop: true,
            prevent_trading_while_owner_present: false,
            tax_rate: 0,
            item_matching: ItemMatching::default(),
            book_item: default_book_item(),
            blank_book_item: default_blank_book_item(),
        }
    }
}

impl TradingConfig {
    /// The tax withheld from a payout of the given amount.
    ///
    /// The rule is the same for every policy: the tax is `amount *
    /// tax_rate / 100`, rounded *up*, so the payout rounds down.
    pub fn tax_on(&self, amount: u32) -> u32 {
        let rate = self.tax_rate.min(100);
        if rate == 0 {
            return 0;
        }
        let tax = u64::from(amount)
            .saturating_mul(u64::from(rate))
            .div_ceil(100);
        u32::try_from(tax).unwrap_or(u32::MAX)
    }

    /// The payout left after tax: `amount - tax_on(amount)`.
    pub fn amount_after_tax(&self, amount: u32) -> u32 {
        amount.saturating_sub(self.tax_on(amount))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = ShopConfig::parse("{}").unwrap();
        assert_eq!(config, ShopConfig::default());
        assert!(config.trading.prevent_trading_with_own_shop);
        assert_eq!(config.trading.tax_rate, 0);
    }

    #[test]
    fn yaml_overrides_selected_fields() {
        let yaml = "\
trading:
  tax_rate: 10
  prevent_trading_while_owner_present: true
currency:
  high_value: 4
";
        let config = ShopConfig::parse(yaml).unwrap();
        assert_eq!(config.trading.tax_rate, 10);
        assert!(config.trading.prevent_trading_while_owner_present);
        assert_eq!(config.currency.high_value, 4);
        // Untouched fields keep their defaults.
        assert_eq!(config.currency.high_min_cost, 20);
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        assert!(matches!(
            ShopConfig::parse(": not yaml"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn tax_rounds_up_and_payout_rounds_down() {
        let trading = TradingConfig {
            tax_rate: 10,
            ..TradingConfig::default()
        };
        // 10% of 25 is 2.5: tax 3, payout 22.
        assert_eq!(trading.tax_on(25), 3);
        assert_eq!(trading.amount_after_tax(25), 22);
        assert_eq!(trading.amount_after_tax(30), 27);
    }

    #[test]
    fn zero_rate_is_a_passthrough() {
        let trading = TradingConfig::default();
        assert_eq!(trading.tax_on(100), 0);
        assert_eq!(trading.amount_after_tax(100), 100);
    }

    #[test]
    fn rates_above_full_confiscate_everything() {
        let trading = TradingConfig {
            tax_rate: 250,
            ..TradingConfig::default()
        };
        assert_eq!(trading.amount_after_tax(40), 0);
    }
}
