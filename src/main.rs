use balances::configuration::Settings;
use balances::*;
use log::{info, LevelFilter};
use serde::Serialize;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(long, default_value = "balances.toml", help = "settings file")]
    config: String,
    #[structopt(long, short, parse(from_os_str), help = "snapshot of upstream state (JSON)")]
    snapshot: PathBuf,
    #[structopt(long, short, help = "debug logging")]
    verbose: bool,
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    #[structopt(about = "balances of all wallets")]
    Summary {
        #[structopt(long, help = "ignore enabled-network filters")]
        all_chains: bool,
    },
    #[structopt(about = "balance of one wallet")]
    Wallet { wallet_id: String },
    #[structopt(about = "balance of the selected account group")]
    Group,
    #[structopt(about = "whether the selected account holds any non-zero token")]
    HasBalance,
    #[structopt(about = "balance of a single token")]
    Token {
        account: String,
        chain_id: String,
        token: String,
    },
}

#[derive(Debug, serde::Deserialize)]
struct Snapshot {
    #[serde(default)]
    state: RootState,
    #[serde(default)]
    calculated: Option<CalculatedBalances>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BalanceFlags {
    has_any_balance: bool,
    address_has_token_balances: bool,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    let settings = Settings::get_configuration(&opt.config)?;
    let level = if opt.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    logging::init(&settings.log_config, level)?;
    info!("settings from {}", opt.config);

    let raw = std::fs::read_to_string(&opt.snapshot)?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    info!("loaded snapshot from {}", opt.snapshot.display());
    let selectors = BalanceSelectors::new(RecordedCalculator::new(snapshot.calculated), &settings)?;
    let state = snapshot.state;

    match opt.cmd {
        Command::Summary { all_chains } => {
            let all = if all_chains {
                selectors.balance_for_all_wallets_and_chains(&state)?
            } else {
                selectors.balance_for_all_wallets(&state)?
            };
            print(&*all)
        }
        Command::Wallet { wallet_id } => print(&*selectors.balance_for_wallet(&state, &wallet_id)?),
        Command::Group => print(&*selectors.balance_for_selected_group(&state)?),
        Command::HasBalance => print(&BalanceFlags {
            has_any_balance: selectors.has_any_balance(&state),
            address_has_token_balances: selectors.address_has_token_balances(&state),
        }),
        Command::Token {
            account,
            chain_id,
            token,
        } => print(&*selectors.single_token_balance(&state, &account, &chain_id, &token)),
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
