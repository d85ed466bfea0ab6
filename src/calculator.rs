//! Invocation of the external balance calculator.
//!
//! The calculator does the valuation arithmetic; this module only feeds it projected
//! inputs, replaces an empty answer with an empty wallet set, and attaches the placeholder
//! balances.

use crate::defaults::{merge_with_defaults, BalanceTable, DefaultBalanceTable};
use crate::error::Result;
use crate::projectors::{
    AccountTreeState, AccountsState, CurrencyRateState, MultichainAssetsRatesState, MultichainBalancesState,
    TokenBalancesState, TokenRatesState, TokensState,
};
use crate::state::EnabledNetworkMap;
use crate::wallets::{AllWalletBalances, CalculatedBalances};
use log::debug;
use std::sync::Arc;

/// The eight projected states, in calculator argument order.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceInputs {
    pub account_tree: Arc<AccountTreeState>,
    pub accounts: Arc<AccountsState>,
    pub token_balances: Arc<TokenBalancesState>,
    pub token_rates: Arc<TokenRatesState>,
    pub multichain_rates: Arc<MultichainAssetsRatesState>,
    pub multichain_balances: Arc<MultichainBalancesState>,
    pub tokens: Arc<TokensState>,
    pub currency_rate: Arc<CurrencyRateState>,
}

pub trait BalanceCalculator {
    /// `Ok(None)` stands for "no usable result"; errors are passed through untouched.
    fn calculate_balance_for_all_wallets(
        &self,
        inputs: &BalanceInputs,
        enabled_networks: Option<&EnabledNetworkMap>,
    ) -> Result<Option<CalculatedBalances>>;
}

impl<F> BalanceCalculator for F
where
    F: Fn(&BalanceInputs, Option<&EnabledNetworkMap>) -> Result<Option<CalculatedBalances>>,
{
    fn calculate_balance_for_all_wallets(
        &self,
        inputs: &BalanceInputs,
        enabled_networks: Option<&EnabledNetworkMap>,
    ) -> Result<Option<CalculatedBalances>> {
        self(inputs, enabled_networks)
    }
}

/// Replays a previously captured calculator answer, whatever the inputs.
#[derive(Debug, Clone, Default)]
pub struct RecordedCalculator {
    result: Option<CalculatedBalances>,
}

impl RecordedCalculator {
    pub fn new(result: Option<CalculatedBalances>) -> Self {
        Self { result }
    }
}

impl BalanceCalculator for RecordedCalculator {
    fn calculate_balance_for_all_wallets(
        &self,
        _inputs: &BalanceInputs,
        _enabled_networks: Option<&EnabledNetworkMap>,
    ) -> Result<Option<CalculatedBalances>> {
        Ok(self.result.clone())
    }
}

pub fn compute_all_wallet_balances<C>(
    calculator: &C,
    inputs: &BalanceInputs,
    enabled_networks: Option<&EnabledNetworkMap>,
    defaults: &DefaultBalanceTable,
) -> Result<AllWalletBalances>
where
    C: BalanceCalculator + ?Sized,
{
    let calculated = calculator.calculate_balance_for_all_wallets(inputs, enabled_networks)?;
    let default_balances = Arc::new(merge_with_defaults(defaults, &BalanceTable::new()));
    let fallback_currency = inputs.currency_rate.current_currency.as_str();
    match calculated {
        Some(result) if !result.wallets.is_empty() => {
            let user_currency = if result.user_currency.is_empty() {
                String::from(fallback_currency)
            } else {
                result.user_currency
            };
            Ok(AllWalletBalances {
                wallets: result.wallets,
                user_currency,
                default_balances,
            })
        }
        _ => {
            debug!("calculator returned no wallets, using empty result");
            Ok(AllWalletBalances::empty(fallback_currency, default_balances))
        }
    }
}

/// Same as [`compute_all_wallet_balances`] across every chain, ignoring network filters.
pub fn compute_all_wallet_balances_all_chains<C>(
    calculator: &C,
    inputs: &BalanceInputs,
    defaults: &DefaultBalanceTable,
) -> Result<AllWalletBalances>
where
    C: BalanceCalculator + ?Sized,
{
    compute_all_wallet_balances(calculator, inputs, None, defaults)
}
