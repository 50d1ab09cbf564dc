use super::args::*;
use crate::exit_codes::SUCCESS;

pub mod cache;
pub(crate) mod context;
pub mod holders;
pub mod stats;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let global = cli.global;
    match cli.cmd {
        Command::Stats(args) => stats::run(&global, args).await,
        Command::Holders(args) => holders::run(&global, args).await,
        Command::Cache(args) => cache::run(&global, args).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}
