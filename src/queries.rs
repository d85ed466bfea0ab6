//! Lookups over the address -> chain -> token balance map.

use crate::defaults::{DefaultBalanceTable, ZERO_AMOUNT};
use crate::state::{NestedTokenBalanceMap, NetworkClassifier};
use std::collections::BTreeMap;

type ChainBalances = BTreeMap<String, BTreeMap<String, String>>;

/// Exact key first, then the lower-cased key.
fn lookup<'a, V>(map: &'a BTreeMap<String, V>, key: &str) -> Option<&'a V> {
    map.get(key).or_else(|| map.get(&key.to_ascii_lowercase()))
}

/// True when some address has some chain with at least one token entry, whatever its value.
pub fn has_any_balance(balances: &NestedTokenBalanceMap) -> bool {
    balances
        .values()
        .any(|chains| chains.values().any(|tokens| !tokens.is_empty()))
}

pub fn is_non_zero(balance: &str) -> bool {
    !balance.is_empty() && balance != ZERO_AMOUNT
}

/// Test networks are skipped unless fiat is shown on them.
pub fn address_has_non_zero_balance<N>(
    balances: &NestedTokenBalanceMap,
    address: Option<&str>,
    networks: &N,
    show_fiat_in_testnets: bool,
) -> bool
where
    N: NetworkClassifier + ?Sized,
{
    let address = match address {
        Some(address) if !address.is_empty() => address,
        _ => return false,
    };
    let chains = match lookup(balances, address) {
        Some(chains) => chains,
        None => return false,
    };
    chains
        .iter()
        .filter(|(chain_id, _)| show_fiat_in_testnets || !networks.is_test_net(chain_id))
        .any(|(_, tokens)| tokens.values().any(|balance| is_non_zero(balance)))
}

/// `{token: balance}` for one token, the placeholder amount when the token is a known
/// symbol without data, or nothing.
pub fn single_token_balance(
    balances: &NestedTokenBalanceMap,
    account: &str,
    chain_id: &str,
    token: &str,
    defaults: &DefaultBalanceTable,
) -> BTreeMap<String, String> {
    let balance = lookup(balances, account)
        .and_then(|chains| lookup(chains, chain_id))
        .and_then(|tokens| lookup(tokens, token))
        .cloned()
        .or_else(|| defaults.get(token).map(|default| default.amount.clone()));
    balance
        .map(|balance| std::iter::once((String::from(token), balance)).collect())
        .unwrap_or_default()
}

/// Per-token balances of `address` on `chain_id`, placeholder amounts underneath.
pub fn contract_balances(
    balances: &NestedTokenBalanceMap,
    address: Option<&str>,
    chain_id: &str,
    defaults: &DefaultBalanceTable,
) -> BTreeMap<String, String> {
    let mut merged: BTreeMap<String, String> = defaults
        .table()
        .iter()
        .map(|(symbol, balance)| (symbol.clone(), balance.amount.clone()))
        .collect();
    let tokens = address
        .and_then(|address| lookup(balances, address))
        .and_then(|chains| lookup(chains, chain_id));
    if let Some(tokens) = tokens {
        merged.extend(tokens.iter().map(|(token, balance)| (token.clone(), balance.clone())));
    }
    merged
}

pub fn contract_balances_per_chain(balances: &NestedTokenBalanceMap, address: Option<&str>) -> ChainBalances {
    address
        .and_then(|address| lookup(balances, address))
        .cloned()
        .unwrap_or_default()
}
