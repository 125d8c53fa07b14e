use crate::cli::{Cli, SettingsArgs, SettingsCommand, SettingsSetArgs};
use crate::context;
use crate::errors;
use crate::interactive;
use crate::output::OutputWriter;
use anyhow::{bail, Result};
use eegview_core::models::{AnalysisSettings, AnalysisType, FilterType, NotchFreq};
use eegview_store::SettingsStore;
use tabled::Tabled;

#[derive(Tabled)]
struct SettingRow {
    #[tabled(rename = "Setting")]
    setting: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn execute(args: &SettingsArgs, output: &OutputWriter, cli: &Cli) -> Result<()> {
    let ctx = context::load(cli)?;
    let current = SettingsStore::load(&ctx.store)?.unwrap_or_default();

    match &args.command {
        SettingsCommand::Show => {
            if output.is_json() {
                output.result(&current)?;
            } else {
                output.table(rows(&current));
            }
            Ok(())
        }
        SettingsCommand::Set(set_args) => set(set_args, output, &ctx, current),
        SettingsCommand::Edit => {
            // Edits land in a buffer; nothing persists until the whole
            // buffer validates.
            let buffer = interactive::edit_settings(&current)?;
            match buffer.validate() {
                Ok(()) => {
                    SettingsStore::save(&ctx.store, &buffer)?;
                    output.success("Settings saved");
                    Ok(())
                }
                Err(err) => {
                    errors::from_eegview(&err, &ctx.config.base_url).display();
                    bail!("settings not saved");
                }
            }
        }
        SettingsCommand::Reset => {
            SettingsStore::save(&ctx.store, &AnalysisSettings::default())?;
            output.success("Settings restored to defaults");
            Ok(())
        }
    }
}

fn set(
    args: &SettingsSetArgs,
    output: &OutputWriter,
    ctx: &context::AppContext,
    mut buffer: AnalysisSettings,
) -> Result<()> {
    let value = args.value.as_str();
    match args.key.as_str() {
        "filter-low" => buffer.filter_range[0] = parse_number(value, "filter-low")?,
        "filter-high" => buffer.filter_range[1] = parse_number(value, "filter-high")?,
        "notch" => {
            let freq: u16 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("notch expects 0, 50, or 60"))?;
            buffer.notch_freq =
                NotchFreq::try_from(freq).map_err(|reason| anyhow::anyhow!(reason))?;
        }
        "type" => {
            buffer.analysis_type = match value.to_lowercase().as_str() {
                "comprehensive" => AnalysisType::Comprehensive,
                "quick" => AnalysisType::Quick,
                "custom" => AnalysisType::Custom,
                other => bail!("unknown analysis type '{}': use comprehensive, quick, or custom", other),
            };
        }
        "bands" => buffer.custom_bands = value.to_string(),
        "ica" => buffer.apply_ica = parse_flag(value, "ica")?,
        "ica-components" => buffer.advanced.ica_components = parse_number(value, "ica-components")?,
        "epoch-length" => buffer.advanced.epoch_length = parse_number(value, "epoch-length")?,
        "overlap" => buffer.advanced.overlap_percentage = parse_number(value, "overlap")?,
        "baseline-correction" => {
            buffer.advanced.baseline_correction = parse_flag(value, "baseline-correction")?
        }
        "artifact-threshold" => {
            buffer.advanced.artifact_rejection_threshold =
                parse_number(value, "artifact-threshold")?
        }
        "interpolate" => buffer.advanced.interpolate_channels = parse_flag(value, "interpolate")?,
        "filter-order" => buffer.advanced.filter_order = parse_number(value, "filter-order")?,
        "filter-type" => {
            buffer.advanced.filter_type = match value.to_lowercase().as_str() {
                "butterworth" => FilterType::Butterworth,
                "chebyshev" => FilterType::Chebyshev,
                "elliptic" => FilterType::Elliptic,
                "bessel" => FilterType::Bessel,
                other => bail!(
                    "unknown filter type '{}': use butterworth, chebyshev, elliptic, or bessel",
                    other
                ),
            };
        }
        other => bail!(
            "unknown setting '{}'. Keys: filter-low, filter-high, notch, type, bands, ica, \
             ica-components, epoch-length, overlap, baseline-correction, artifact-threshold, \
             interpolate, filter-order, filter-type",
            other
        ),
    }

    // Commit boundary: an invalid buffer is reported and discarded.
    match buffer.validate() {
        Ok(()) => {
            SettingsStore::save(&ctx.store, &buffer)?;
            output.success(format!("Updated {}", args.key));
            Ok(())
        }
        Err(err) => {
            errors::from_eegview(&err, &ctx.config.base_url).display();
            bail!("settings not saved");
        }
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, key: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("{} expects a number, got '{}'", key, value))
}

fn parse_flag(value: &str, key: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        other => bail!("{} expects on/off, got '{}'", key, other),
    }
}

fn rows(settings: &AnalysisSettings) -> Vec<SettingRow> {
    vec![
        SettingRow {
            setting: "Filter range",
            value: format!(
                "{}-{} Hz",
                settings.filter_range[0], settings.filter_range[1]
            ),
        },
        SettingRow {
            setting: "Notch",
            value: settings.notch_freq.to_string(),
        },
        SettingRow {
            setting: "Analysis type",
            value: settings.analysis_type.to_string(),
        },
        SettingRow {
            setting: "Custom bands",
            value: if settings.custom_bands.is_empty() {
                "(none)".to_string()
            } else {
                settings.custom_bands.clone()
            },
        },
        SettingRow {
            setting: "Apply ICA",
            value: if settings.apply_ica { "on" } else { "off" }.to_string(),
        },
        SettingRow {
            setting: "ICA components",
            value: settings.advanced.ica_components.to_string(),
        },
        SettingRow {
            setting: "Epoch length",
            value: format!("{} s", settings.advanced.epoch_length),
        },
        SettingRow {
            setting: "Overlap",
            value: format!("{}%", settings.advanced.overlap_percentage),
        },
        SettingRow {
            setting: "Baseline correction",
            value: settings.advanced.baseline_correction.to_string(),
        },
        SettingRow {
            setting: "Artifact threshold",
            value: settings.advanced.artifact_rejection_threshold.to_string(),
        },
        SettingRow {
            setting: "Interpolate channels",
            value: settings.advanced.interpolate_channels.to_string(),
        },
        SettingRow {
            setting: "Filter order",
            value: settings.advanced.filter_order.to_string(),
        },
        SettingRow {
            setting: "Filter type",
            value: format!("{:?}", settings.advanced.filter_type).to_lowercase(),
        },
    ]
}
