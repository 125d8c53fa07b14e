use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use eegview_core::models::{
    parse_bands, AnalysisSettings, AnalysisType, FilterType, NotchFreq, ThemePreference,
};
use eegview_render::Tab;

/// Interactive settings editor.
///
/// Edits accumulate in a buffer and are returned for the caller to validate
/// and commit; abandoning the prompt chain leaves the stored settings
/// untouched.
pub fn edit_settings(current: &AnalysisSettings) -> Result<AnalysisSettings> {
    println!("\n⚙ Analysis Settings\n");

    let low: f64 = Input::new()
        .with_prompt("Bandpass low (Hz)")
        .default(current.filter_range[0])
        .interact_text()?;
    let high: f64 = Input::new()
        .with_prompt("Bandpass high (Hz)")
        .default(current.filter_range[1])
        .interact_text()?;

    let notch_options = vec!["50 Hz (Europe/Asia)", "60 Hz (Americas)", "None"];
    let notch_default = match current.notch_freq {
        NotchFreq::Hz50 => 0,
        NotchFreq::Hz60 => 1,
        NotchFreq::Off => 2,
    };
    let notch_idx = Select::new()
        .with_prompt("Notch frequency")
        .items(&notch_options)
        .default(notch_default)
        .interact()?;
    let notch_freq = match notch_idx {
        0 => NotchFreq::Hz50,
        1 => NotchFreq::Hz60,
        _ => NotchFreq::Off,
    };

    let type_options = vec![
        format!("Comprehensive - {}", AnalysisType::Comprehensive.description()),
        format!("Quick - {}", AnalysisType::Quick.description()),
        format!("Custom - {}", AnalysisType::Custom.description()),
    ];
    let type_default = match current.analysis_type {
        AnalysisType::Comprehensive => 0,
        AnalysisType::Quick => 1,
        AnalysisType::Custom => 2,
    };
    let type_idx = Select::new()
        .with_prompt("Analysis type")
        .items(&type_options)
        .default(type_default)
        .interact()?;
    let analysis_type = match type_idx {
        0 => AnalysisType::Comprehensive,
        1 => AnalysisType::Quick,
        _ => AnalysisType::Custom,
    };

    let custom_bands = if analysis_type == AnalysisType::Custom {
        Input::new()
            .with_prompt("Custom bands (e.g. delta:1-4,theta:4-8,alpha:8-13)")
            .default(current.custom_bands.clone())
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                if input.is_empty() {
                    Err("Custom frequency bands are required".to_string())
                } else {
                    parse_bands(input).map(|_| ())
                }
            })
            .interact_text()?
    } else {
        String::new()
    };

    let apply_ica = Confirm::new()
        .with_prompt("Apply ICA for artifact removal?")
        .default(current.apply_ica)
        .interact()?;

    let mut advanced = current.advanced.clone();
    let edit_advanced = Confirm::new()
        .with_prompt("Edit advanced settings?")
        .default(false)
        .interact()?;
    if edit_advanced {
        advanced.ica_components = Input::new()
            .with_prompt("ICA components")
            .default(advanced.ica_components)
            .interact_text()?;
        advanced.epoch_length = Input::new()
            .with_prompt("Epoch length (s)")
            .default(advanced.epoch_length)
            .interact_text()?;
        advanced.overlap_percentage = Input::new()
            .with_prompt("Overlap (%)")
            .default(advanced.overlap_percentage)
            .interact_text()?;
        advanced.baseline_correction = Confirm::new()
            .with_prompt("Baseline correction?")
            .default(advanced.baseline_correction)
            .interact()?;
        advanced.artifact_rejection_threshold = Input::new()
            .with_prompt("Artifact rejection threshold (µV)")
            .default(advanced.artifact_rejection_threshold)
            .interact_text()?;
        advanced.interpolate_channels = Confirm::new()
            .with_prompt("Interpolate bad channels?")
            .default(advanced.interpolate_channels)
            .interact()?;
        advanced.filter_order = Input::new()
            .with_prompt("Filter order")
            .default(advanced.filter_order)
            .interact_text()?;

        let filter_options = vec!["butterworth", "chebyshev", "elliptic", "bessel"];
        let filter_default = match advanced.filter_type {
            FilterType::Butterworth => 0,
            FilterType::Chebyshev => 1,
            FilterType::Elliptic => 2,
            FilterType::Bessel => 3,
        };
        let filter_idx = Select::new()
            .with_prompt("Filter type")
            .items(&filter_options)
            .default(filter_default)
            .interact()?;
        advanced.filter_type = match filter_idx {
            0 => FilterType::Butterworth,
            1 => FilterType::Chebyshev,
            2 => FilterType::Elliptic,
            _ => FilterType::Bessel,
        };
    }

    Ok(AnalysisSettings {
        filter_range: [low, high],
        notch_freq,
        analysis_type,
        custom_bands,
        apply_ica,
        advanced,
    })
}

/// Theme picker for the interactive session.
pub fn pick_theme(current: ThemePreference) -> Result<ThemePreference> {
    let options = vec!["light", "dark", "system"];
    let default = match current {
        ThemePreference::Light => 0,
        ThemePreference::Dark => 1,
        ThemePreference::System => 2,
    };
    let idx = Select::new()
        .with_prompt("Theme")
        .items(&options)
        .default(default)
        .interact()?;
    Ok(match idx {
        0 => ThemePreference::Light,
        1 => ThemePreference::Dark,
        _ => ThemePreference::System,
    })
}

/// Tab picker for the interactive session.
pub fn pick_tab() -> Result<Tab> {
    let options: Vec<&str> = Tab::ALL.iter().map(|tab| tab.title()).collect();
    let idx = Select::new()
        .with_prompt("Tab")
        .items(&options)
        .default(0)
        .interact()?;
    Ok(Tab::ALL[idx])
}
