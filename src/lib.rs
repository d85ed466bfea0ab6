pub mod calculator;
pub mod configuration;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod memo;
pub mod projectors;
pub mod queries;
pub mod selectors;
pub mod state;
pub mod views;
pub mod wallets;

pub use calculator::{BalanceCalculator, BalanceInputs, RecordedCalculator};
pub use defaults::{merge_with_defaults, BalanceTable, DefaultBalanceTable};
pub use error::{Error, Result};
pub use selectors::BalanceSelectors;
pub use state::RootState;
pub use wallets::{AllWalletBalances, CalculatedBalances, GroupBalance, WalletBalance};
