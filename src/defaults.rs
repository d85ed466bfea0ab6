//! Placeholder balances for well-known assets.
//!
//! A [`DefaultBalanceTable`] is built once (normally from [`crate::configuration::Settings`])
//! and handed to whoever needs it; nothing in here is a global.

use crate::error::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Canonical zero amount, 8 fractional digits.
pub const ZERO_AMOUNT: &str = "0.00000000";
pub const AMOUNT_DECIMALS: u32 = 8;

pub const KNOWN_SYMBOLS: [&str; 10] = ["ETH", "USDT", "USDC", "BNB", "MATIC", "SOL", "AVAX", "ARB", "OP", "BASE"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Balance {
    pub amount: String,
    pub unit: String,
}

impl Balance {
    pub fn zero(unit: &str) -> Self {
        Self {
            amount: String::from(ZERO_AMOUNT),
            unit: String::from(unit),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_empty() || self.amount == ZERO_AMOUNT
    }
}

/// Symbol -> balance. Every entry carries its own key as `unit`; [`BalanceTable::insert`]
/// is the only way in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct BalanceTable(BTreeMap<String, Balance>);

impl BalanceTable {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, symbol: &str, amount: impl Into<String>) {
        let balance = Balance {
            amount: amount.into(),
            unit: String::from(symbol),
        };
        self.0.insert(String::from(symbol), balance);
    }

    pub fn get(&self, symbol: &str) -> Option<&Balance> {
        self.0.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.0.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Balance)> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultBalanceTable {
    table: BalanceTable,
}

impl DefaultBalanceTable {
    /// Zero balance for every symbol in [`KNOWN_SYMBOLS`].
    pub fn standard() -> Self {
        let mut table = BalanceTable::new();
        for symbol in KNOWN_SYMBOLS.iter() {
            table.insert(symbol, ZERO_AMOUNT);
        }
        Self { table }
    }

    /// Builds a table from symbol -> amount pairs. Symbols are upper-cased and amounts
    /// normalised.
    pub fn from_amounts<'a, I>(amounts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut table = BalanceTable::new();
        for (symbol, amount) in amounts {
            table.insert(&symbol.to_ascii_uppercase(), normalize_amount(amount)?);
        }
        Ok(Self { table })
    }

    pub fn table(&self) -> &BalanceTable {
        &self.table
    }

    pub fn get(&self, symbol: &str) -> Option<&Balance> {
        self.table.get(symbol)
    }

    pub fn is_default(&self, symbol: &str, balance: &Balance) -> bool {
        self.table.get(symbol) == Some(balance)
    }
}

impl Default for DefaultBalanceTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Every default symbol is present in the output; entries from `real` win on shared keys
/// and pass through otherwise. Neither input is touched.
pub fn merge_with_defaults(defaults: &DefaultBalanceTable, real: &BalanceTable) -> BalanceTable {
    let mut merged = defaults.table.0.clone();
    for (symbol, balance) in real.iter() {
        merged.insert(symbol.clone(), balance.clone());
    }
    BalanceTable(merged)
}

/// True when some entry holds a non-zero amount that isn't merely the placeholder.
pub fn table_has_balance(defaults: &DefaultBalanceTable, table: &BalanceTable) -> bool {
    table
        .iter()
        .any(|(symbol, balance)| !balance.is_zero() && !defaults.is_default(symbol, balance))
}

/// Renders a decimal string with exactly [`AMOUNT_DECIMALS`] fractional digits.
pub fn normalize_amount(raw: &str) -> Result<String> {
    let value = Decimal::from_str(raw.trim()).map_err(|_| Error::InvalidAmount(String::from(raw)))?;
    if value.is_sign_negative() || value.scale() > AMOUNT_DECIMALS {
        return Err(Error::InvalidAmount(String::from(raw)));
    }
    let mut value = value;
    value.rescale(AMOUNT_DECIMALS);
    // rescale silently keeps fewer digits when the integer part is too wide
    if value.scale() != AMOUNT_DECIMALS {
        return Err(Error::InvalidAmount(String::from(raw)));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> BalanceTable {
        let mut t = BalanceTable::new();
        for (symbol, amount) in entries {
            t.insert(symbol, *amount);
        }
        t
    }

    #[test]
    fn standard_table_covers_known_symbols_with_zero() {
        let defaults = DefaultBalanceTable::standard();
        assert_eq!(defaults.table().len(), KNOWN_SYMBOLS.len());
        for symbol in KNOWN_SYMBOLS.iter() {
            let balance = defaults.get(symbol).expect("known symbol");
            assert_eq!(balance.amount, ZERO_AMOUNT);
            assert_eq!(balance.unit, *symbol);
        }
    }

    #[test]
    fn merge_overrides_and_passes_through() {
        let defaults = DefaultBalanceTable::standard();
        let real = table(&[("ETH", "1.50000000"), ("DAI", "3.00000000")]);
        let merged = merge_with_defaults(&defaults, &real);
        assert_eq!(merged.get("ETH"), real.get("ETH"));
        assert_eq!(merged.get("DAI"), real.get("DAI"));
        assert_eq!(merged.get("SOL"), defaults.get("SOL"));
        assert_eq!(merged.len(), KNOWN_SYMBOLS.len() + 1);
        // inputs untouched
        assert_eq!(real.len(), 2);
        assert_eq!(defaults.get("ETH").map(|b| b.amount.as_str()), Some(ZERO_AMOUNT));
    }

    #[test]
    fn merge_is_idempotent() {
        let defaults = DefaultBalanceTable::standard();
        let inputs = vec![
            BalanceTable::new(),
            table(&[("ETH", "2.00000000")]),
            table(&[("OP", "0.00000001"), ("XYZ", "9.00000000")]),
        ];
        for x in inputs {
            let once = merge_with_defaults(&defaults, &x);
            let twice = merge_with_defaults(&defaults, &once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn substitute_defaults_are_honoured() {
        let mut amounts = BTreeMap::new();
        amounts.insert(String::from("ETH"), String::from("1000"));
        let defaults = DefaultBalanceTable::from_amounts(&amounts).unwrap();
        let merged = merge_with_defaults(&defaults, &BalanceTable::new());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("ETH").unwrap().amount, "1000.00000000");
    }

    #[test]
    fn placeholder_entries_do_not_count_as_balance() {
        let defaults = DefaultBalanceTable::standard();
        let merged = merge_with_defaults(&defaults, &BalanceTable::new());
        assert!(!table_has_balance(&defaults, &merged));
        let merged = merge_with_defaults(&defaults, &table(&[("USDC", "0.00000000")]));
        assert!(!table_has_balance(&defaults, &merged));
        let merged = merge_with_defaults(&defaults, &table(&[("USDC", "4.20000000")]));
        assert!(table_has_balance(&defaults, &merged));
    }

    #[test]
    fn normalize_amount_pads_and_rejects() {
        assert_eq!(normalize_amount("0").unwrap(), ZERO_AMOUNT);
        assert_eq!(normalize_amount("12.5").unwrap(), "12.50000000");
        assert_eq!(normalize_amount(" 1.00000001 ").unwrap(), "1.00000001");
        assert!(normalize_amount("1.000000001").is_err());
        assert!(normalize_amount("-1").is_err());
        assert!(normalize_amount("abc").is_err());
        // 24 integer digits leave room for only 4 fractional ones
        assert!(normalize_amount("100000000000000000000000").is_err());
        assert_eq!(
            normalize_amount("10000000000000000000").unwrap(),
            "10000000000000000000.00000000"
        );
    }
}
