//! The memoized selector graph.
//!
//! Raw slices feed the projector memos; the projected `Arc`s key the aggregation memo,
//! whose output keys the views. When an upstream slice keeps its identity, every memo
//! downstream of it answers from cache.

use crate::calculator::{compute_all_wallet_balances, compute_all_wallet_balances_all_chains, BalanceCalculator, BalanceInputs};
use crate::configuration::Settings;
use crate::defaults::DefaultBalanceTable;
use crate::error::Result;
use crate::memo::{Dependency, Equality, Memo};
use crate::projectors::*;
use crate::queries;
use crate::state::*;
use crate::views::{self, WalletBalanceView};
use crate::wallets::{AllWalletBalances, GroupBalance};
use std::collections::BTreeMap;
use std::sync::Arc;

impl Dependency for BalanceInputs {
    fn unchanged(&self, previous: &Self, equality: Equality) -> bool {
        self.account_tree.unchanged(&previous.account_tree, equality)
            && self.accounts.unchanged(&previous.accounts, equality)
            && self.token_balances.unchanged(&previous.token_balances, equality)
            && self.token_rates.unchanged(&previous.token_rates, equality)
            && self.multichain_rates.unchanged(&previous.multichain_rates, equality)
            && self.multichain_balances.unchanged(&previous.multichain_balances, equality)
            && self.tokens.unchanged(&previous.tokens, equality)
            && self.currency_rate.unchanged(&previous.currency_rate, equality)
    }
}

pub struct BalanceSelectors<C> {
    calculator: C,
    defaults: DefaultBalanceTable,
    networks: TestNetworks,
    fallback_currency: String,

    account_tree: Memo<Arc<RawAccountTreeState>, AccountTreeState>,
    accounts: Memo<(Arc<AccountsById>, Option<String>), AccountsState>,
    token_balances: Memo<Arc<NestedTokenBalanceMap>, TokenBalancesState>,
    token_rates: Memo<Arc<MarketData>, TokenRatesState>,
    multichain_balances: Memo<Arc<MultichainBalances>, MultichainBalancesState>,
    multichain_rates: Memo<Arc<MultichainRates>, MultichainAssetsRatesState>,
    tokens: Memo<Option<Arc<AllTokens>>, TokensState>,
    currency_rate: Memo<(Option<String>, Option<Arc<CurrencyRates>>), CurrencyRateState>,
    enabled_networks: Memo<Option<Arc<EnabledNetworkMap>>, EnabledNetworkMap>,

    all_wallets: Memo<(BalanceInputs, Arc<EnabledNetworkMap>), AllWalletBalances>,
    all_wallets_all_chains: Memo<BalanceInputs, AllWalletBalances>,
    wallet: Memo<(Arc<AllWalletBalances>, String), WalletBalanceView>,
    selected_group: Memo<(Arc<AllWalletBalances>, String), GroupBalance>,

    has_any_balance: Memo<Arc<TokenBalancesState>, bool>,
    address_has_balance: Memo<(Arc<TokenBalancesState>, Option<String>, bool), bool>,
    single_token_balance: Memo<(Arc<TokenBalancesState>, String, String, String), BTreeMap<String, String>>,
    contract_balances: Memo<(Arc<TokenBalancesState>, Option<String>, String), BTreeMap<String, String>>,
    contract_balances_per_chain: Memo<(Arc<TokenBalancesState>, Option<String>), BTreeMap<String, BTreeMap<String, String>>>,
}

impl<C: BalanceCalculator> BalanceSelectors<C> {
    pub fn new(calculator: C, settings: &Settings) -> Result<Self> {
        let defaults = settings.default_balance_table()?;
        Ok(Self::with_defaults(calculator, settings, defaults))
    }

    /// Uses `defaults` instead of the table described by `settings`.
    pub fn with_defaults(calculator: C, settings: &Settings, defaults: DefaultBalanceTable) -> Self {
        let eq = |name| settings.equality_for(name);
        Self {
            calculator,
            defaults,
            networks: settings.test_network_classifier(),
            fallback_currency: settings.fallback_currency.clone(),
            account_tree: Memo::new("account_tree", eq("account_tree")),
            accounts: Memo::new("accounts", eq("accounts")),
            token_balances: Memo::new("token_balances", eq("token_balances")),
            token_rates: Memo::new("token_rates", eq("token_rates")),
            multichain_balances: Memo::new("multichain_balances", eq("multichain_balances")),
            multichain_rates: Memo::new("multichain_rates", eq("multichain_rates")),
            tokens: Memo::new("tokens", eq("tokens")),
            currency_rate: Memo::new("currency_rate", eq("currency_rate")),
            enabled_networks: Memo::new("enabled_networks", eq("enabled_networks")),
            all_wallets: Memo::new("all_wallets", eq("all_wallets")),
            all_wallets_all_chains: Memo::new("all_wallets_all_chains", eq("all_wallets_all_chains")),
            wallet: Memo::new("wallet", eq("wallet")),
            selected_group: Memo::new("selected_group", eq("selected_group")),
            has_any_balance: Memo::new("has_any_balance", eq("has_any_balance")),
            address_has_balance: Memo::new("address_has_balance", eq("address_has_balance")),
            single_token_balance: Memo::new("single_token_balance", eq("single_token_balance")),
            contract_balances: Memo::new("contract_balances", eq("contract_balances")),
            contract_balances_per_chain: Memo::new("contract_balances_per_chain", eq("contract_balances_per_chain")),
        }
    }

    pub fn defaults(&self) -> &DefaultBalanceTable {
        &self.defaults
    }

    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    // --------------------------------
    // projectors

    pub fn account_tree_state(&self, state: &RootState) -> Arc<AccountTreeState> {
        self.account_tree
            .get(Arc::clone(&state.account_tree), |raw| project_account_tree(raw))
    }

    pub fn accounts_state(&self, state: &RootState) -> Arc<AccountsState> {
        let key = (Arc::clone(&state.accounts_by_id), state.selected_account_id.clone());
        self.accounts
            .get(key, |(accounts, selected)| project_accounts(accounts, selected.as_deref()))
    }

    pub fn token_balances_state(&self, state: &RootState) -> Arc<TokenBalancesState> {
        self.token_balances
            .get(Arc::clone(&state.token_balances), |balances| project_token_balances(balances))
    }

    pub fn token_rates_state(&self, state: &RootState) -> Arc<TokenRatesState> {
        self.token_rates
            .get(Arc::clone(&state.token_market_data), |market_data| project_token_rates(market_data))
    }

    pub fn multichain_balances_state(&self, state: &RootState) -> Arc<MultichainBalancesState> {
        self.multichain_balances
            .get(Arc::clone(&state.multichain_balances), |balances| project_multichain_balances(balances))
    }

    pub fn multichain_rates_state(&self, state: &RootState) -> Arc<MultichainAssetsRatesState> {
        self.multichain_rates
            .get(Arc::clone(&state.multichain_rates), |rates| project_multichain_rates(rates))
    }

    pub fn tokens_state(&self, state: &RootState) -> Arc<TokensState> {
        self.tokens
            .get(state.all_tokens.clone(), |all_tokens| project_tokens(all_tokens.as_deref()))
    }

    pub fn currency_rate_state(&self, state: &RootState) -> Arc<CurrencyRateState> {
        let key = (state.current_currency.clone(), state.currency_rates.clone());
        self.currency_rate.get(key, |(currency, rates)| {
            project_currency_rate(currency.as_deref(), rates.as_deref(), &self.fallback_currency)
        })
    }

    pub fn enabled_networks(&self, state: &RootState) -> Arc<EnabledNetworkMap> {
        self.enabled_networks
            .get(state.enabled_networks.clone(), |enabled| project_enabled_networks(enabled.as_deref()))
    }

    pub fn balance_inputs(&self, state: &RootState) -> BalanceInputs {
        BalanceInputs {
            account_tree: self.account_tree_state(state),
            accounts: self.accounts_state(state),
            token_balances: self.token_balances_state(state),
            token_rates: self.token_rates_state(state),
            multichain_rates: self.multichain_rates_state(state),
            multichain_balances: self.multichain_balances_state(state),
            tokens: self.tokens_state(state),
            currency_rate: self.currency_rate_state(state),
        }
    }

    // --------------------------------
    // aggregation and views

    pub fn balance_for_all_wallets(&self, state: &RootState) -> Result<Arc<AllWalletBalances>> {
        let key = (self.balance_inputs(state), self.enabled_networks(state));
        self.all_wallets.try_get(key, |(inputs, enabled)| {
            compute_all_wallet_balances(&self.calculator, inputs, Some(&**enabled), &self.defaults)
        })
    }

    pub fn balance_for_all_wallets_and_chains(&self, state: &RootState) -> Result<Arc<AllWalletBalances>> {
        self.all_wallets_all_chains.try_get(self.balance_inputs(state), |inputs| {
            compute_all_wallet_balances_all_chains(&self.calculator, inputs, &self.defaults)
        })
    }

    pub fn balance_for_wallet(&self, state: &RootState, wallet_id: &str) -> Result<Arc<WalletBalanceView>> {
        let all = self.balance_for_all_wallets(state)?;
        Ok(self
            .wallet
            .get((all, String::from(wallet_id)), |(all, wallet_id)| views::balance_for_wallet(all, wallet_id)))
    }

    pub fn balance_for_selected_group(&self, state: &RootState) -> Result<Arc<GroupBalance>> {
        let all = self.balance_for_all_wallets(state)?;
        let group_id = String::from(state.selected_account_group_id().unwrap_or(""));
        Ok(self
            .selected_group
            .get((all, group_id), |(all, group_id)| views::balance_for_group(all, group_id)))
    }

    // --------------------------------
    // balance queries

    pub fn has_any_balance(&self, state: &RootState) -> bool {
        let balances = self.token_balances_state(state);
        *self
            .has_any_balance
            .get(balances, |balances| queries::has_any_balance(&balances.token_balances))
    }

    pub fn address_has_token_balances(&self, state: &RootState) -> bool {
        let key = (
            self.token_balances_state(state),
            state.selected_account_address().map(String::from),
            state.show_fiat_in_testnets,
        );
        *self.address_has_balance.get(key, |(balances, address, show_fiat)| {
            queries::address_has_non_zero_balance(&balances.token_balances, address.as_deref(), &self.networks, *show_fiat)
        })
    }

    pub fn single_token_balance(
        &self,
        state: &RootState,
        account: &str,
        chain_id: &str,
        token: &str,
    ) -> Arc<BTreeMap<String, String>> {
        let key = (
            self.token_balances_state(state),
            String::from(account),
            String::from(chain_id),
            String::from(token),
        );
        self.single_token_balance.get(key, |(balances, account, chain_id, token)| {
            queries::single_token_balance(&balances.token_balances, account, chain_id, token, &self.defaults)
        })
    }

    pub fn contract_balances(&self, state: &RootState) -> Arc<BTreeMap<String, String>> {
        let key = (
            self.token_balances_state(state),
            state.selected_account_address().map(String::from),
            state.evm_chain_id.clone(),
        );
        self.contract_balances.get(key, |(balances, address, chain_id)| {
            queries::contract_balances(&balances.token_balances, address.as_deref(), chain_id, &self.defaults)
        })
    }

    pub fn contract_balances_per_chain(&self, state: &RootState) -> Arc<BTreeMap<String, BTreeMap<String, String>>> {
        let key = (self.token_balances_state(state), state.selected_account_address().map(String::from));
        self.contract_balances_per_chain.get(key, |(balances, address)| {
            queries::contract_balances_per_chain(&balances.token_balances, address.as_deref())
        })
    }

    /// How often each selector actually recomputed.
    pub fn computations(&self) -> BTreeMap<&'static str, usize> {
        let counts = [
            (self.account_tree.name(), self.account_tree.computations()),
            (self.accounts.name(), self.accounts.computations()),
            (self.token_balances.name(), self.token_balances.computations()),
            (self.token_rates.name(), self.token_rates.computations()),
            (self.multichain_balances.name(), self.multichain_balances.computations()),
            (self.multichain_rates.name(), self.multichain_rates.computations()),
            (self.tokens.name(), self.tokens.computations()),
            (self.currency_rate.name(), self.currency_rate.computations()),
            (self.enabled_networks.name(), self.enabled_networks.computations()),
            (self.all_wallets.name(), self.all_wallets.computations()),
            (self.all_wallets_all_chains.name(), self.all_wallets_all_chains.computations()),
            (self.wallet.name(), self.wallet.computations()),
            (self.selected_group.name(), self.selected_group.computations()),
            (self.has_any_balance.name(), self.has_any_balance.computations()),
            (self.address_has_balance.name(), self.address_has_balance.computations()),
            (self.single_token_balance.name(), self.single_token_balance.computations()),
            (self.contract_balances.name(), self.contract_balances.computations()),
            (self.contract_balances_per_chain.name(), self.contract_balances_per_chain.computations()),
        ];
        counts.iter().cloned().collect()
    }
}
