use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "holdstats",
    version,
    about = "Holder score statistics for art collections"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: holdstats.yaml in the working directory, if present)
    #[arg(long, global = true, env = "HOLDSTATS_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite score store path
    #[arg(long, global = true, env = "HOLDSTATS_STORE")]
    pub store: Option<PathBuf>,

    /// Keep scores in memory for this run only (ignores --store)
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Maximum age of a cached score before it is re-fetched
    #[arg(long, global = true, env = "HOLDSTATS_FRESHNESS_HOURS")]
    pub freshness_hours: Option<i64>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve holder scores and print the score distribution
    Stats(CollectionArgs),
    /// Resolve holder scores and print each holder
    Holders(CollectionArgs),
    /// Inspect the score store
    Cache(CacheArgs),
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct CollectionArgs {
    /// Collection identifier
    pub collection: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub cmd: CacheSub,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheSub {
    /// List stored scores
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
