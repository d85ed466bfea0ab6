use crate::defaults::DefaultBalanceTable;
use crate::error::Result;
use crate::memo::Equality;
use crate::projectors::FALLBACK_CURRENCY;
use crate::state::{TestNetworks, DEFAULT_TEST_NETWORKS};
use std::collections::BTreeMap;

pub const ENV_PREFIX: &str = "BALANCES";
/// Nests environment keys, as in `BALANCES_DEFAULT_BALANCES__ETH=1000`.
pub const ENV_KEY_SEPARATOR: &str = "__";

#[derive(Debug, serde::Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub fallback_currency: String,
    pub test_networks: Vec<String>,
    /// symbol -> amount; empty means the standard table
    pub default_balances: BTreeMap<String, String>,
    /// selectors whose inputs are compared structurally
    pub deep_compare: Vec<String>,
    pub log_config: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fallback_currency: String::from(FALLBACK_CURRENCY),
            test_networks: DEFAULT_TEST_NETWORKS.iter().map(|id| String::from(*id)).collect(),
            default_balances: BTreeMap::new(),
            deep_compare: vec![String::from("token_balances")],
            log_config: String::from("log4rs.yaml"),
        }
    }
}

impl Settings {
    /// Reads `config_file` if present, then `BALANCES_*` variables on top. List settings
    /// are comma separated in the environment.
    pub fn get_configuration(config_file: &str) -> Result<Self> {
        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_KEY_SEPARATOR)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("test_networks")
            .with_list_parse_key("deep_compare");
        let config_reader = config::Config::builder()
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(environment)
            .build()?;
        Ok(config_reader.try_deserialize()?)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config_reader = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?;
        Ok(config_reader.try_deserialize()?)
    }

    pub fn default_balance_table(&self) -> Result<DefaultBalanceTable> {
        if self.default_balances.is_empty() {
            Ok(DefaultBalanceTable::standard())
        } else {
            DefaultBalanceTable::from_amounts(&self.default_balances)
        }
    }

    pub fn test_network_classifier(&self) -> TestNetworks {
        TestNetworks::new(&self.test_networks)
    }

    pub fn equality_for(&self, selector: &str) -> Equality {
        if self.deep_compare.iter().any(|name| name == selector) {
            Equality::Deep
        } else {
            Equality::Identity
        }
    }
}
