use crate::defaults::BalanceTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBalance {
    pub wallet_id: String,
    pub group_id: String,
    pub total_balance_in_user_currency: f64,
    pub user_currency: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub wallet_id: String,
    pub total_balance_in_user_currency: f64,
    #[serde(default)]
    pub groups: BTreeMap<String, GroupBalance>,
    /// token key -> value in user currency
    #[serde(default)]
    pub tokens: BTreeMap<String, f64>,
}

/// What the external calculator hands back.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedBalances {
    #[serde(default)]
    pub wallets: BTreeMap<String, WalletBalance>,
    #[serde(default)]
    pub user_currency: String,
}

/// Calculator output with the placeholder table attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllWalletBalances {
    pub wallets: BTreeMap<String, WalletBalance>,
    pub user_currency: String,
    pub default_balances: Arc<BalanceTable>,
}

impl AllWalletBalances {
    pub fn empty(user_currency: &str, default_balances: Arc<BalanceTable>) -> Self {
        Self {
            wallets: BTreeMap::new(),
            user_currency: String::from(user_currency),
            default_balances,
        }
    }

    pub fn group(&self, wallet_id: &str, group_id: &str) -> Option<&GroupBalance> {
        self.wallets.get(wallet_id).and_then(|wallet| wallet.groups.get(group_id))
    }
}
