//! Raw upstream state, as the owning stores expose it.
//!
//! Every slice sits behind an `Arc` so that an unchanged slice keeps its identity across
//! updates of the surrounding [`RootState`]. Fields the stores may leave out are `Option`.

use crate::defaults::Balance;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// account address -> chain id -> token address -> balance string.
pub type NestedTokenBalanceMap = BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>;
/// chain id -> token address -> market data.
pub type MarketData = BTreeMap<String, BTreeMap<String, TokenMarketData>>;
/// account id -> asset id -> balance.
pub type MultichainBalances = BTreeMap<String, BTreeMap<String, Balance>>;
/// asset id -> conversion rate.
pub type MultichainRates = BTreeMap<String, ConversionRate>;
/// chain id -> account address -> tokens.
pub type AllTokens = BTreeMap<String, BTreeMap<String, Vec<Token>>>;
/// chain id -> account address -> ignored token addresses.
pub type IgnoredTokens = BTreeMap<String, BTreeMap<String, Vec<String>>>;
/// native currency ticker -> rate.
pub type CurrencyRates = BTreeMap<String, CurrencyRate>;
/// namespace -> chain id -> enabled.
pub type EnabledNetworkMap = BTreeMap<String, BTreeMap<String, bool>>;
pub type AccountsById = BTreeMap<String, InternalAccount>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountGroupObject {
    pub id: String,
    #[serde(default)]
    pub accounts: Vec<String>,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWalletObject {
    pub id: String,
    #[serde(default)]
    pub groups: BTreeMap<String, AccountGroupObject>,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTree {
    #[serde(default)]
    pub wallets: BTreeMap<String, AccountWalletObject>,
    #[serde(default)]
    pub selected_account_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAccountTreeState {
    #[serde(default)]
    pub account_tree: AccountTree,
    #[serde(default)]
    pub account_groups_metadata: Option<BTreeMap<String, EntityMetadata>>,
    #[serde(default)]
    pub account_wallets_metadata: Option<BTreeMap<String, EntityMetadata>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalAccount {
    pub id: String,
    pub address: String,
    #[serde(default, rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMarketData {
    pub token_address: String,
    pub currency: String,
    pub price: f64,
    #[serde(default)]
    pub price_percent_change_1d: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRate {
    pub rate: String,
    #[serde(default)]
    pub conversion_time: Option<i64>,
    #[serde(default)]
    pub expiration_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRate {
    #[serde(default)]
    pub conversion_rate: Option<f64>,
    #[serde(default)]
    pub usd_conversion_rate: Option<f64>,
    #[serde(default)]
    pub conversion_date: Option<f64>,
}

/// Everything this crate reads from the upstream stores. Never written to from here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RootState {
    pub account_tree: Arc<RawAccountTreeState>,
    pub accounts_by_id: Arc<AccountsById>,
    pub selected_account_id: Option<String>,
    pub token_balances: Arc<NestedTokenBalanceMap>,
    pub token_market_data: Arc<MarketData>,
    pub multichain_balances: Arc<MultichainBalances>,
    pub multichain_rates: Arc<MultichainRates>,
    pub all_tokens: Option<Arc<AllTokens>>,
    pub current_currency: Option<String>,
    pub currency_rates: Option<Arc<CurrencyRates>>,
    pub enabled_networks: Option<Arc<EnabledNetworkMap>>,
    pub evm_chain_id: String,
    pub show_fiat_in_testnets: bool,
}

impl RootState {
    /// Address of the selected internal account, if there is one.
    pub fn selected_account_address(&self) -> Option<&str> {
        self.selected_account_id
            .as_ref()
            .and_then(|id| self.accounts_by_id.get(id))
            .map(|account| account.address.as_str())
    }

    pub fn selected_account_group_id(&self) -> Option<&str> {
        self.account_tree.account_tree.selected_account_group.as_deref()
    }
}

pub trait NetworkClassifier {
    fn is_test_net(&self, chain_id: &str) -> bool;
}

pub const DEFAULT_TEST_NETWORKS: [&str; 5] = ["0x5", "0xaa36a7", "0xe704", "0xe705", "0x539"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestNetworks {
    chain_ids: BTreeSet<String>,
}

impl TestNetworks {
    pub fn new<I, S>(chain_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            chain_ids: chain_ids.into_iter().map(|id| id.as_ref().to_ascii_lowercase()).collect(),
        }
    }
}

impl Default for TestNetworks {
    fn default() -> Self {
        Self::new(DEFAULT_TEST_NETWORKS.iter())
    }
}

impl NetworkClassifier for TestNetworks {
    fn is_test_net(&self, chain_id: &str) -> bool {
        self.chain_ids.contains(&chain_id.to_ascii_lowercase())
    }
}
