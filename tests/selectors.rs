use balances::configuration::Settings;
use balances::state::{EnabledNetworkMap, InternalAccount, NestedTokenBalanceMap, RawAccountTreeState};
use balances::*;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

/// Sums every token balance per wallet; counts its own invocations.
fn summing_calculator(
    calls: Rc<Cell<usize>>,
) -> impl Fn(&BalanceInputs, Option<&EnabledNetworkMap>) -> Result<Option<CalculatedBalances>> {
    move |inputs: &BalanceInputs, _: Option<&EnabledNetworkMap>| -> Result<Option<CalculatedBalances>> {
        calls.set(calls.get() + 1);
        let total: f64 = inputs
            .token_balances
            .token_balances
            .values()
            .flat_map(|chains| chains.values())
            .flat_map(|tokens| tokens.values())
            .map(|balance| balance.parse::<f64>().unwrap_or(0.0))
            .sum();
        if total == 0.0 {
            return Ok(None);
        }
        let currency = inputs.currency_rate.current_currency.clone();
        let mut wallet = WalletBalance {
            wallet_id: String::from("wallet1"),
            total_balance_in_user_currency: total,
            ..Default::default()
        };
        wallet.groups.insert(
            String::from("wallet1/group2"),
            GroupBalance {
                wallet_id: String::from("wallet1"),
                group_id: String::from("wallet1/group2"),
                total_balance_in_user_currency: total,
                user_currency: currency.clone(),
            },
        );
        let mut wallets = BTreeMap::new();
        wallets.insert(String::from("wallet1"), wallet);
        Ok(Some(CalculatedBalances {
            wallets,
            user_currency: currency,
        }))
    }
}

fn balances(entries: &[(&str, &str, &str, &str)]) -> Arc<NestedTokenBalanceMap> {
    let mut map = NestedTokenBalanceMap::new();
    for (address, chain, token, balance) in entries {
        map.entry(address.to_string())
            .or_default()
            .entry(chain.to_string())
            .or_default()
            .insert(token.to_string(), balance.to_string());
    }
    Arc::new(map)
}

fn state_with_account(address: &str) -> RootState {
    let mut accounts = BTreeMap::new();
    accounts.insert(
        String::from("acc-1"),
        InternalAccount {
            id: String::from("acc-1"),
            address: String::from(address),
            ..Default::default()
        },
    );
    let mut tree = RawAccountTreeState::default();
    tree.account_tree.selected_account_group = Some(String::from("wallet1/group2"));
    RootState {
        account_tree: Arc::new(tree),
        accounts_by_id: Arc::new(accounts),
        selected_account_id: Some(String::from("acc-1")),
        evm_chain_id: String::from("0x1"),
        ..Default::default()
    }
}

#[test]
fn empty_upstream_gives_empty_wallets_and_defaults() {
    let calls = Rc::new(Cell::new(0));
    let selectors = BalanceSelectors::new(summing_calculator(Rc::clone(&calls)), &Settings::default()).unwrap();
    let state = RootState::default();
    let all = selectors.balance_for_all_wallets(&state).unwrap();
    assert!(all.wallets.is_empty());
    assert_eq!(all.user_currency, "usd");
    assert_eq!(*all.default_balances, *DefaultBalanceTable::standard().table());
    let wallet = selectors.balance_for_wallet(&state, "nonexistent").unwrap();
    assert_eq!(wallet.total_balance_in_user_currency, 0.0);
    assert!(wallet.groups.is_empty());
    assert!(wallet.tokens.is_empty());
    assert_eq!(wallet.user_currency, "usd");
}

#[test]
fn updates_flow_through_and_unrelated_changes_are_cached() {
    let calls = Rc::new(Cell::new(0));
    let selectors = BalanceSelectors::new(summing_calculator(Rc::clone(&calls)), &Settings::default()).unwrap();

    let mut state = state_with_account("0xA");
    state.token_balances = balances(&[("0xA", "0x1", "0xToken", "5.00000000")]);
    state.current_currency = Some(String::from("eur"));

    let group = selectors.balance_for_selected_group(&state).unwrap();
    assert_eq!(group.total_balance_in_user_currency, 5.0);
    assert_eq!(group.user_currency, "eur");
    assert_eq!(calls.get(), 1);

    // toggling a flag the aggregation doesn't read
    state.show_fiat_in_testnets = true;
    let again = selectors.balance_for_selected_group(&state).unwrap();
    assert!(Arc::ptr_eq(&group, &again));
    assert_eq!(calls.get(), 1);

    // equal balances in a fresh allocation are compared structurally
    state.token_balances = balances(&[("0xA", "0x1", "0xToken", "5.00000000")]);
    selectors.balance_for_all_wallets(&state).unwrap();
    assert_eq!(calls.get(), 1);

    state.token_balances = balances(&[("0xA", "0x1", "0xToken", "7.00000000")]);
    let group = selectors.balance_for_selected_group(&state).unwrap();
    assert_eq!(group.total_balance_in_user_currency, 7.0);
    assert_eq!(calls.get(), 2);
}

#[test]
fn all_chains_aggregation_is_cached_separately() {
    let calls = Rc::new(Cell::new(0));
    let selectors = BalanceSelectors::new(summing_calculator(Rc::clone(&calls)), &Settings::default()).unwrap();
    let mut state = state_with_account("0xa");
    state.token_balances = balances(&[("0xa", "0x1", "0xt", "1.00000000")]);
    selectors.balance_for_all_wallets(&state).unwrap();
    selectors.balance_for_all_wallets_and_chains(&state).unwrap();
    selectors.balance_for_all_wallets_and_chains(&state).unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn testnet_balances_follow_the_fiat_flag() {
    let selectors = BalanceSelectors::new(RecordedCalculator::default(), &Settings::default()).unwrap();
    let mut state = state_with_account("0xA");
    state.token_balances = balances(&[("0xA", "0x539", "0xToken", "5.00000000")]);
    assert!(selectors.has_any_balance(&state));
    assert!(!selectors.address_has_token_balances(&state));
    state.show_fiat_in_testnets = true;
    assert!(selectors.address_has_token_balances(&state));
}

#[test]
fn zero_balances_exist_but_are_not_holdings() {
    let selectors = BalanceSelectors::new(RecordedCalculator::default(), &Settings::default()).unwrap();
    let mut state = state_with_account("0xA");
    state.token_balances = balances(&[("0xA", "0x1", "0xToken", "0.00000000")]);
    assert!(selectors.has_any_balance(&state));
    assert!(!selectors.address_has_token_balances(&state));
}

#[test]
fn contract_balances_for_selected_account() {
    let selectors = BalanceSelectors::new(RecordedCalculator::default(), &Settings::default()).unwrap();
    let mut state = state_with_account("0xa");
    state.token_balances = balances(&[("0xa", "0x1", "0xdead", "2.00000000"), ("0xa", "0x89", "0xbeef", "1.00000000")]);
    let contract = selectors.contract_balances(&state);
    assert_eq!(contract["0xdead"], "2.00000000");
    assert_eq!(contract["ETH"], "0.00000000");
    assert!(!contract.contains_key("0xbeef"));
    assert_eq!(selectors.contract_balances_per_chain(&state).len(), 2);
    let single = selectors.single_token_balance(&state, "0xa", "0x89", "0xbeef");
    assert_eq!(single["0xbeef"], "1.00000000");
}

#[test]
fn substituted_defaults_are_attached() {
    let mut amounts = BTreeMap::new();
    amounts.insert(String::from("ETH"), String::from("1000"));
    let defaults = DefaultBalanceTable::from_amounts(&amounts).unwrap();
    let selectors = BalanceSelectors::with_defaults(RecordedCalculator::default(), &Settings::default(), defaults);
    let all = selectors.balance_for_all_wallets(&RootState::default()).unwrap();
    assert_eq!(all.default_balances.len(), 1);
    assert_eq!(all.default_balances.get("ETH").unwrap().amount, "1000.00000000");
}

#[test]
fn snapshot_state_deserializes() {
    let state: RootState = serde_json::from_str(
        r#"{
            "accountTree": {
                "accountTree": { "wallets": {}, "selectedAccountGroup": "wallet1/group2" }
            },
            "accountsById": { "acc-1": { "id": "acc-1", "address": "0xa", "type": "eip155:eoa" } },
            "selectedAccountId": "acc-1",
            "tokenBalances": { "0xa": { "0x1": { "0xdead": "1.00000000" } } },
            "currentCurrency": "eur",
            "showFiatInTestnets": false
        }"#,
    )
    .unwrap();
    let selectors = BalanceSelectors::new(RecordedCalculator::default(), &Settings::default()).unwrap();
    assert_eq!(state.selected_account_group_id(), Some("wallet1/group2"));
    assert!(selectors.address_has_token_balances(&state));
    let group = selectors.balance_for_selected_group(&state).unwrap();
    assert_eq!(group.group_id, "wallet1/group2");
    assert_eq!(group.wallet_id, "wallet1");
    assert_eq!(group.user_currency, "eur");
}
