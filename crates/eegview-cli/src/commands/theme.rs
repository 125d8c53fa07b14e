use crate::cli::{Cli, ThemeArgs, ThemeCommand};
use crate::context;
use crate::output::OutputWriter;
use anyhow::{bail, Result};
use eegview_core::models::{ResolvedTheme, ThemePreference};
use eegview_render::chart_chrome;
use eegview_store::ThemeStore;

pub fn execute(args: &ThemeArgs, output: &OutputWriter, cli: &Cli) -> Result<()> {
    let ctx = context::load(cli)?;

    match &args.command {
        ThemeCommand::Show => {
            let preference = ThemeStore::load(&ctx.store)?.unwrap_or_default();
            let resolved = preference.resolve(true);
            let chrome = chart_chrome(resolved);

            if output.is_json() {
                output.result(serde_json::json!({
                    "preference": preference,
                    "resolved": match resolved {
                        ResolvedTheme::Dark => "dark",
                        ResolvedTheme::Light => "light",
                    },
                    "chrome": chrome,
                }))?;
            } else {
                output.kv("Preference", preference);
                output.kv(
                    "Resolved",
                    match resolved {
                        ResolvedTheme::Dark => "dark",
                        ResolvedTheme::Light => "light",
                    },
                );
                output.kv("Chart background", chrome.background);
                output.kv("Chart text", chrome.text);
                output.kv("Chart grid", &chrome.grid);
            }
            Ok(())
        }
        ThemeCommand::Set(set_args) => {
            let preference = match ThemePreference::parse(&set_args.preference) {
                Some(preference) => preference,
                None => bail!(
                    "unknown theme '{}': use light, dark, or system",
                    set_args.preference
                ),
            };
            ThemeStore::save(&ctx.store, preference)?;
            output.success(format!("Theme set to {}", preference));
            Ok(())
        }
    }
}
