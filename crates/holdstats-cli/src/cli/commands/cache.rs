use holdstats_core::Holder;

use super::context::{load_config, StoreHandle};
use crate::cli::args::{CacheArgs, CacheSub, GlobalArgs, OutputFormat};
use crate::exit_codes::SUCCESS;

pub async fn run(global: &GlobalArgs, args: CacheArgs) -> anyhow::Result<i32> {
    match args.cmd {
        CacheSub::List { format } => list(global, format).await,
    }
}

async fn list(global: &GlobalArgs, format: OutputFormat) -> anyhow::Result<i32> {
    let config = load_config(global)?;
    let store = StoreHandle::open(global, &config)?;
    let entries = store.list().await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            if entries.is_empty() {
                eprintln!("no cached scores in {}", store.describe());
            } else {
                let holders: Vec<Holder> = entries.into_iter().map(Holder::from).collect();
                print!("{}", super::holders::render_text(&holders));
            }
        }
    }

    Ok(SUCCESS)
}
