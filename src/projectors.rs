//! Reshape raw upstream slices into the inputs the balance calculator expects.
//!
//! Each projector is total: optional upstream fields come out as empty maps, a missing
//! selected account as `""` and a missing currency as the configured fallback.

use crate::state::{
    AccountTree, AccountsById, AllTokens, CurrencyRates, EnabledNetworkMap, EntityMetadata, IgnoredTokens,
    MarketData, MultichainBalances, MultichainRates, NestedTokenBalanceMap, RawAccountTreeState,
};
use serde::Serialize;
use std::collections::BTreeMap;

pub const FALLBACK_CURRENCY: &str = "usd";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTreeState {
    pub account_tree: AccountTree,
    pub account_groups_metadata: BTreeMap<String, EntityMetadata>,
    pub account_wallets_metadata: BTreeMap<String, EntityMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalAccounts {
    pub accounts: AccountsById,
    pub selected_account: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsState {
    pub internal_accounts: InternalAccounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalancesState {
    pub token_balances: NestedTokenBalanceMap,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRatesState {
    pub market_data: MarketData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultichainBalancesState {
    pub balances: MultichainBalances,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultichainAssetsRatesState {
    pub conversion_rates: MultichainRates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensState {
    pub all_tokens: AllTokens,
    pub all_ignored_tokens: IgnoredTokens,
    pub all_detected_tokens: AllTokens,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRateState {
    pub current_currency: String,
    pub currency_rates: CurrencyRates,
}

pub fn project_account_tree(raw: &RawAccountTreeState) -> AccountTreeState {
    AccountTreeState {
        account_tree: raw.account_tree.clone(),
        account_groups_metadata: raw.account_groups_metadata.clone().unwrap_or_default(),
        account_wallets_metadata: raw.account_wallets_metadata.clone().unwrap_or_default(),
    }
}

pub fn project_accounts(accounts: &AccountsById, selected_account_id: Option<&str>) -> AccountsState {
    AccountsState {
        internal_accounts: InternalAccounts {
            accounts: accounts.clone(),
            selected_account: String::from(selected_account_id.unwrap_or("")),
        },
    }
}

/// Keys are lower-cased on the way through.
pub fn project_token_balances(balances: &NestedTokenBalanceMap) -> TokenBalancesState {
    let mut token_balances = NestedTokenBalanceMap::new();
    for (address, chains) in balances {
        let by_chain = token_balances.entry(address.to_ascii_lowercase()).or_default();
        for (chain_id, tokens) in chains {
            let by_token = by_chain.entry(chain_id.to_ascii_lowercase()).or_default();
            for (token, balance) in tokens {
                by_token.insert(token.to_ascii_lowercase(), balance.clone());
            }
        }
    }
    TokenBalancesState { token_balances }
}

pub fn project_token_rates(market_data: &MarketData) -> TokenRatesState {
    TokenRatesState {
        market_data: market_data.clone(),
    }
}

pub fn project_multichain_balances(balances: &MultichainBalances) -> MultichainBalancesState {
    MultichainBalancesState {
        balances: balances.clone(),
    }
}

pub fn project_multichain_rates(rates: &MultichainRates) -> MultichainAssetsRatesState {
    MultichainAssetsRatesState {
        conversion_rates: rates.clone(),
    }
}

/// Ignored and detected tokens are not tracked here and always project empty.
pub fn project_tokens(all_tokens: Option<&AllTokens>) -> TokensState {
    TokensState {
        all_tokens: all_tokens.cloned().unwrap_or_default(),
        all_ignored_tokens: IgnoredTokens::new(),
        all_detected_tokens: AllTokens::new(),
    }
}

pub fn project_currency_rate(
    current_currency: Option<&str>,
    currency_rates: Option<&CurrencyRates>,
    fallback_currency: &str,
) -> CurrencyRateState {
    CurrencyRateState {
        current_currency: String::from(current_currency.unwrap_or(fallback_currency)),
        currency_rates: currency_rates.cloned().unwrap_or_default(),
    }
}

pub fn project_enabled_networks(enabled: Option<&EnabledNetworkMap>) -> EnabledNetworkMap {
    enabled.cloned().unwrap_or_default()
}
