use crate::wallets::{AllWalletBalances, GroupBalance};
use serde::Serialize;
use std::collections::BTreeMap;

/// Separator between the wallet part and the group part of an account-group id.
pub const GROUP_ID_SEPARATOR: char = '/';

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalanceView {
    pub wallet_id: String,
    pub total_balance_in_user_currency: f64,
    pub groups: BTreeMap<String, GroupBalance>,
    pub tokens: BTreeMap<String, f64>,
    pub user_currency: String,
}

/// Owner wallet of an account group: everything before the first separator.
pub fn wallet_id_of_group(group_id: &str) -> &str {
    group_id.split(GROUP_ID_SEPARATOR).next().unwrap_or(group_id)
}

pub fn balance_for_wallet(all: &AllWalletBalances, wallet_id: &str) -> WalletBalanceView {
    match all.wallets.get(wallet_id) {
        Some(wallet) => WalletBalanceView {
            wallet_id: wallet.wallet_id.clone(),
            total_balance_in_user_currency: wallet.total_balance_in_user_currency,
            groups: wallet.groups.clone(),
            tokens: wallet.tokens.clone(),
            user_currency: all.user_currency.clone(),
        },
        None => WalletBalanceView {
            wallet_id: String::from(wallet_id),
            total_balance_in_user_currency: 0.0,
            groups: BTreeMap::new(),
            tokens: BTreeMap::new(),
            user_currency: all.user_currency.clone(),
        },
    }
}

pub fn balance_for_group(all: &AllWalletBalances, group_id: &str) -> GroupBalance {
    let wallet_id = wallet_id_of_group(group_id);
    match all.group(wallet_id, group_id) {
        Some(group) => group.clone(),
        None => GroupBalance {
            wallet_id: String::from(wallet_id),
            group_id: String::from(group_id),
            total_balance_in_user_currency: 0.0,
            user_currency: all.user_currency.clone(),
        },
    }
}
