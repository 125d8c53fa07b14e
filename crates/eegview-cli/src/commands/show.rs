use crate::cli::{Cli, ShowArgs};
use crate::context;
use crate::errors;
use crate::output::OutputWriter;
use anyhow::Result;
use eegview_core::models::ThemePreference;
use eegview_render::{chart_chrome, render, Panel, Tab};
use eegview_store::{SnapshotStore, ThemeStore};
use std::collections::BTreeMap;
use std::fs;
use tabled::Tabled;

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Series")]
    series: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Values")]
    values: String,
}

pub fn execute(args: &ShowArgs, output: &OutputWriter, cli: &Cli) -> Result<()> {
    let ctx = context::load(cli)?;

    let snapshot = match ctx.store.load_result()? {
        Some(snapshot) => snapshot,
        None => {
            errors::no_result().display();
            anyhow::bail!("no results");
        }
    };
    let result = snapshot.result;

    let preference = ThemeStore::load(&ctx.store)?.unwrap_or_default();
    // Terminals give no color-scheme signal, so `system` resolves dark.
    let chrome = chart_chrome(preference.resolve(true));

    let tabs: Vec<Tab> = match args.tab {
        Some(tab) => vec![tab.into()],
        None => Tab::ALL.to_vec(),
    };

    let mut panels: BTreeMap<String, Panel> = BTreeMap::new();
    for tab in tabs {
        let panel = render(&result, tab);
        if !output.is_json() {
            output.section(tab.title());
            match &panel {
                Panel::Chart(figure) => {
                    output.kv("Labels", figure.labels.join(", "));
                    let rows: Vec<SeriesRow> = figure
                        .series
                        .iter()
                        .map(|series| SeriesRow {
                            series: series.name.clone(),
                            color: series.color.clone(),
                            values: series
                                .values
                                .iter()
                                .map(|v| format!("{:.2}", v))
                                .collect::<Vec<_>>()
                                .join(", "),
                        })
                        .collect();
                    output.table(rows);
                }
                Panel::Empty(reason) => output.warning(reason),
            }
        }
        panels.insert(tab.title().to_string(), panel);
    }

    if let Some(path) = &args.export {
        let document = serde_json::json!({
            "theme": chrome,
            "amplitude_unit": ctx.config.amplitude_unit,
            "analyzed_at": snapshot.saved_at,
            "panels": panels,
        });
        fs::write(path, serde_json::to_string_pretty(&document)?)?;
        output.success(format!("Chart data written to {}", path.display()));
    }

    if output.is_json() {
        output.result(&panels)?;
    }
    Ok(())
}
