use crate::cli::InitArgs;
use crate::errors::CliError;
use crate::output::OutputWriter;
use anyhow::Result;
use eegview_core::models::{AnalysisSettings, ThemePreference};
use eegview_core::EegviewError;
use eegview_store::{JsonProfileStore, Profile, SettingsStore, ThemeStore};
use std::fs;

const CONFIG_TEMPLATE: &str = r#"# eegview backend configuration.
# Values here override the built-in defaults; environment variables
# (EEGVIEW_BASE_URL, ...) and CLI flags override this file.

# base_url = "http://localhost:5000"
# socket_url = "ws://localhost:5000"
# max_upload_mb = 100
# analysis_timeout_secs = 300
# reconnect_attempts = 5
# reconnect_delay_secs = 3
# amplitude_unit = "µV"
"#;

pub fn execute(args: &InitArgs, output: &OutputWriter) -> Result<()> {
    let profile = match Profile::init(&args.path, args.force) {
        Ok(profile) => profile,
        Err(EegviewError::ProfileExists { path }) => {
            CliError::new("Profile already exists")
                .with_context(format!("Found an existing profile at {}", path.display()))
                .with_suggestion("Re-initialize in place: eegview init --force")
                .with_suggestion("Or just start using it: eegview status")
                .display();
            anyhow::bail!("profile exists");
        }
        Err(err) => return Err(err.into()),
    };

    let store = JsonProfileStore::new(profile.clone());
    SettingsStore::save(&store, &AnalysisSettings::default())?;
    ThemeStore::save(&store, ThemePreference::default())?;

    let config_path = profile.config_path();
    if !config_path.exists() {
        fs::write(&config_path, CONFIG_TEMPLATE)?;
    }

    output.success(format!("Initialized profile at {}", profile.root().display()));
    output.info("Next: eegview upload <recording.edf>");
    Ok(())
}
