//! Shared command context: profile discovery plus layered configuration.

use crate::cli::Cli;
use crate::errors;
use anyhow::Result;
use eegview_core::config::{ClientConfig, CliConfigOverrides, LayeredConfig};
use eegview_store::{JsonProfileStore, Profile};

pub struct AppContext {
    pub store: JsonProfileStore,
    pub layered: LayeredConfig,
    pub config: ClientConfig,
}

/// Resolve the profile and flatten the configuration layers:
/// defaults < profile config.toml < environment < CLI flags.
pub fn load(cli: &Cli) -> Result<AppContext> {
    let profile = match Profile::discover() {
        Some(profile) => profile,
        None => {
            errors::profile_not_found().display();
            anyhow::bail!("no profile");
        }
    };

    let mut layered = LayeredConfig::with_defaults();
    let config_path = profile.config_path();
    if config_path.exists() {
        layered = layered.load_from_file(&config_path)?;
    }
    layered = layered.load_from_env();
    layered.update_from_cli(CliConfigOverrides {
        base_url: cli.base_url.clone(),
        socket_url: cli.socket_url.clone(),
        analysis_timeout_secs: cli.timeout_secs,
    });

    let config = layered.resolved();
    Ok(AppContext {
        store: JsonProfileStore::new(profile),
        layered,
        config,
    })
}
