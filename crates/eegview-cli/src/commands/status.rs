use crate::cli::{Cli, StatusArgs};
use crate::context;
use crate::output::OutputWriter;
use anyhow::Result;
use eegview_render::{render, Panel, Tab};
use eegview_store::{SettingsStore, SnapshotStore, ThemeStore};
use tabled::Tabled;

#[derive(Tabled)]
struct ConfigRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

pub fn execute(args: &StatusArgs, output: &OutputWriter, cli: &Cli) -> Result<()> {
    let ctx = context::load(cli)?;

    let dataset = ctx.store.load_dataset()?;
    let result = ctx.store.load_result()?;
    let settings = SettingsStore::load(&ctx.store)?.unwrap_or_default();
    let theme = ThemeStore::load(&ctx.store)?.unwrap_or_default();

    if output.is_json() {
        let tabs: serde_json::Map<String, serde_json::Value> = result
            .as_ref()
            .map(|snapshot| {
                Tab::ALL
                    .iter()
                    .map(|tab| {
                        let availability = match render(&snapshot.result, *tab) {
                            Panel::Chart(figure) => {
                                format!("{} series", figure.series.len())
                            }
                            Panel::Empty(reason) => reason.to_string(),
                        };
                        (tab.title().to_string(), availability.into())
                    })
                    .collect()
            })
            .unwrap_or_default();

        output.result(serde_json::json!({
            "profile": ctx.store.profile().root(),
            "base_url": ctx.config.base_url,
            "socket_url": ctx.config.channel_url(),
            "dataset": dataset.as_ref().map(|s| serde_json::json!({
                "file_path": s.descriptor.file_path,
                "channels": s.descriptor.channel_count,
                "samples": s.descriptor.sample_count(),
                "uploaded_at": s.saved_at,
            })),
            "result": result.as_ref().map(|s| serde_json::json!({
                "analyzed_at": s.saved_at,
                "tabs": tabs,
            })),
            "settings": settings,
            "theme": theme,
        }))?;
        return Ok(());
    }

    output.section("Profile");
    output.kv("Root", ctx.store.profile().root().display());

    output.section("Backend");
    output.kv("Base URL", &ctx.config.base_url);
    output.kv("Channel URL", ctx.config.channel_url());
    output.kv(
        "Analysis timeout",
        format!("{}s", ctx.config.analysis_timeout.as_secs()),
    );
    if args.verbose {
        let rows: Vec<ConfigRow> = ctx
            .layered
            .to_inspection_map()
            .into_iter()
            .map(|(key, (value, source))| ConfigRow {
                key,
                value,
                source: format!("{:?}", source),
            })
            .collect();
        output.table(rows);
    }

    output.section("Dataset");
    match &dataset {
        Some(snapshot) => {
            output.kv("Recording", &snapshot.descriptor.file_path);
            output.kv("Channels", snapshot.descriptor.channel_count);
            output.kv("Samples", snapshot.descriptor.sample_count());
            output.kv("Uploaded", snapshot.saved_at.to_rfc3339());
        }
        None => output.info("No dataset uploaded"),
    }

    output.section("Results");
    match &result {
        Some(snapshot) => {
            output.kv("Analyzed", snapshot.saved_at.to_rfc3339());
            for tab in Tab::ALL {
                match render(&snapshot.result, tab) {
                    Panel::Chart(figure) => {
                        output.kv(tab.title(), format!("{} series", figure.series.len()))
                    }
                    Panel::Empty(reason) => output.kv(tab.title(), reason),
                }
            }
        }
        None => output.info("No analysis results"),
    }

    output.section("Settings");
    output.kv(
        "Filter range",
        format!(
            "{}-{} Hz",
            settings.filter_range[0], settings.filter_range[1]
        ),
    );
    output.kv("Notch", settings.notch_freq);
    output.kv("Analysis type", settings.analysis_type);
    output.kv("Theme", theme);

    Ok(())
}
