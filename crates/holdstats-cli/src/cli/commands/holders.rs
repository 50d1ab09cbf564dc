use std::fmt::Write as _;

use chrono::SecondsFormat;
use holdstats_core::{Collection, Holder};

use super::context::{build_orchestrator, cancel_on_ctrl_c, load_config, StoreHandle};
use crate::cli::args::{CollectionArgs, GlobalArgs, OutputFormat};
use crate::exit_codes::SUCCESS;

pub async fn run(global: &GlobalArgs, args: CollectionArgs) -> anyhow::Result<i32> {
    let config = load_config(global)?;
    let store = StoreHandle::open(global, &config)?;
    let orchestrator = build_orchestrator(&config, &store)?;

    let cancel = cancel_on_ctrl_c();
    let collection = orchestrator
        .resolve_with_cancel(Collection::new(args.collection), &cancel)
        .await?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&collection.holders)?),
        OutputFormat::Text => print!("{}", render_text(&collection.holders)),
    }

    Ok(SUCCESS)
}

pub(crate) fn render_text(holders: &[Holder]) -> String {
    let width = holders.iter().map(|h| h.address.len()).max().unwrap_or(0);

    let mut out = String::new();
    for holder in holders {
        let updated = holder
            .updated_at
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<width$}  {:>10.2}  {}",
            holder.address, holder.score, updated
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use holdstats_core::ScoreEntry;

    #[test]
    fn test_render_text() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let holders = vec![
            Holder::from(ScoreEntry::new("0xabc", 42.5, at)),
            Holder::new("0x1"),
        ];

        let text = render_text(&holders);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "0xabc       42.50  2024-03-01T12:00:00Z");
        assert_eq!(lines[1], "0x1          0.00  -");
    }
}
