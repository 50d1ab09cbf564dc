use std::fmt::Write as _;

use holdstats_core::{Collection, Distribution};
use serde::Serialize;

use super::context::{build_orchestrator, cancel_on_ctrl_c, load_config, StoreHandle};
use crate::cli::args::{CollectionArgs, GlobalArgs, OutputFormat};
use crate::exit_codes::SUCCESS;

#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    collection: &'a str,
    holders_count: usize,
    distribution: &'a Distribution,
}

impl<'a> StatsReport<'a> {
    fn from_collection(collection: &'a Collection) -> anyhow::Result<Self> {
        let distribution = collection.distribution.as_ref().ok_or_else(|| {
            anyhow::anyhow!("collection {} has no score distribution", collection.id)
        })?;
        Ok(Self {
            collection: &collection.id,
            holders_count: collection.holders_count,
            distribution,
        })
    }
}

pub async fn run(global: &GlobalArgs, args: CollectionArgs) -> anyhow::Result<i32> {
    let config = load_config(global)?;
    let store = StoreHandle::open(global, &config)?;
    let orchestrator = build_orchestrator(&config, &store)?;

    let cancel = cancel_on_ctrl_c();
    let collection = orchestrator
        .calculate_stats_with_cancel(Collection::new(args.collection), &cancel)
        .await?;

    let report = StatsReport::from_collection(&collection)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render_text(report.collection, report.distribution)),
    }

    Ok(SUCCESS)
}

fn render_text(collection: &str, distribution: &Distribution) -> String {
    let width = distribution
        .buckets
        .iter()
        .map(|b| b.label.len())
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "collection {}: {} holders\n",
        collection, distribution.total
    );
    for bucket in &distribution.buckets {
        let _ = writeln!(out, "  {:<width$}  {}", bucket.label, bucket.holders);
    }
    out
}
