//! Interactive upload/analyze/view loop: the page, driven from a terminal.

use crate::cli::{Cli, SessionArgs, TransportKind};
use crate::context::{self, AppContext};
use crate::interactive;
use crate::output::OutputWriter;
use crate::progress::{create_spinner, finish_error, finish_success};
use anyhow::Result;
use dialoguer::{Input, Select};
use eegview_client::{HttpBackend, SocketBackend};
use eegview_core::intake;
use eegview_core::models::AnalysisSettings;
use eegview_core::ports::{AnalysisTransport, UploadTransport};
use eegview_core::session::{Session, SessionPhase};
use eegview_render::{render, Panel};
use eegview_store::{SettingsStore, SnapshotStore, ThemeStore};
use std::path::Path;

pub async fn execute(args: &SessionArgs, output: &OutputWriter, cli: &Cli) -> Result<()> {
    let ctx = context::load(cli)?;

    let dataset = ctx.store.load_dataset()?.map(|s| s.descriptor);
    let result = ctx.store.load_result()?.map(|s| s.result);
    let mut session = Session::restore(dataset, result);
    let mut settings = SettingsStore::load(&ctx.store)?.unwrap_or_default();

    output.info("Interactive session. State persists to the profile as you go.");

    loop {
        if let Some(error) = session.last_error() {
            output.warning(format!("Last failure: {}", error));
        }

        let actions = vec![
            "Upload a recording",
            "Edit settings",
            "Run analysis",
            "View results",
            "Switch theme",
            "Quit",
        ];
        let choice = Select::new()
            .with_prompt(format!("[{}]", phase_label(session.phase())))
            .items(&actions)
            .default(0)
            .interact()?;

        match choice {
            0 => upload_flow(&mut session, &ctx, output).await?,
            1 => {
                let buffer = interactive::edit_settings(&settings)?;
                match buffer.validate() {
                    Ok(()) => {
                        SettingsStore::save(&ctx.store, &buffer)?;
                        settings = buffer;
                        output.success("Settings saved");
                    }
                    Err(err) => output.error(err),
                }
            }
            2 => analyze_flow(&mut session, &ctx, output, args.transport, &settings).await?,
            3 => view_flow(&session, output)?,
            4 => {
                let current = ThemeStore::load(&ctx.store)?.unwrap_or_default();
                let preference = interactive::pick_theme(current)?;
                ThemeStore::save(&ctx.store, preference)?;
                output.success(format!("Theme set to {}", preference));
            }
            _ => break,
        }
    }

    // Leaving the loop is the teardown point; dropping the session discards
    // any in-flight generations.
    output.info("Session closed");
    Ok(())
}

fn phase_label(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Idle => "no dataset",
        SessionPhase::FileSelected => "file selected",
        SessionPhase::Uploading => "uploading",
        SessionPhase::DatasetReady => "dataset ready",
        SessionPhase::Submitting => "analyzing",
        SessionPhase::ResultsReady => "results ready",
    }
}

async fn upload_flow(
    session: &mut Session,
    ctx: &AppContext,
    output: &OutputWriter,
) -> Result<()> {
    let path: String = Input::new().with_prompt("Recording path").interact_text()?;

    let file = match intake::prepare(Path::new(&path), &ctx.config).await {
        Ok(file) => file,
        Err(err) => {
            output.error(err);
            return Ok(());
        }
    };

    session.select_file();
    let generation = session.begin_upload();

    let backend = HttpBackend::new(ctx.config.clone())?;
    let spinner = create_spinner(&format!("Uploading {}...", file.name));
    let outcome = backend.upload(&file).await;
    let failure = outcome.as_ref().err().map(ToString::to_string);
    session.complete_upload(generation, outcome);

    match failure {
        Some(message) => {
            finish_error(&spinner, "Upload failed");
            output.error(message);
        }
        None => {
            finish_success(&spinner, "Upload complete");
            if let Some(descriptor) = session.dataset() {
                ctx.store.save_dataset(descriptor)?;
                ctx.store.clear_result()?;
                output.success(format!(
                    "Dataset ready: {} channel(s), {} samples",
                    descriptor.channel_count,
                    descriptor.sample_count()
                ));
            }
        }
    }
    Ok(())
}

async fn analyze_flow(
    session: &mut Session,
    ctx: &AppContext,
    output: &OutputWriter,
    transport: TransportKind,
    settings: &AnalysisSettings,
) -> Result<()> {
    if let Err(err) = settings.validate() {
        output.error(err);
        return Ok(());
    }
    let generation = match session.begin_analysis() {
        Ok(generation) => generation,
        Err(err) => {
            output.error(err);
            return Ok(());
        }
    };

    let spinner = create_spinner("Running analysis...");
    let outcome = match session.dataset() {
        Some(dataset) => match transport {
            TransportKind::Http => {
                let backend = HttpBackend::new(ctx.config.clone())?;
                backend.analyze(dataset, settings).await
            }
            TransportKind::Socket => {
                spinner.set_message(format!("Connecting to {}...", ctx.config.channel_url()));
                let backend = SocketBackend::new(&ctx.config);
                match backend.connect().await {
                    Ok(()) => {
                        spinner.set_message("Running analysis...");
                        let outcome = backend.analyze(dataset, settings).await;
                        let _ = backend.close().await;
                        outcome
                    }
                    Err(err) => Err(err),
                }
            }
        },
        None => Err(eegview_core::EegviewError::NoDataset),
    };

    let failure = outcome.as_ref().err().map(ToString::to_string);
    session.complete_analysis(generation, outcome);

    match failure {
        Some(message) => {
            finish_error(&spinner, "Analysis failed");
            output.error(message);
        }
        None => {
            finish_success(&spinner, "Analysis complete");
            if let Some(result) = session.result() {
                ctx.store.save_result(result)?;
                output.success("Results ready");
            }
        }
    }
    Ok(())
}

fn view_flow(session: &Session, output: &OutputWriter) -> Result<()> {
    let result = match session.result() {
        Some(result) => result,
        None => {
            output.warning("No analysis results yet");
            return Ok(());
        }
    };

    let tab = interactive::pick_tab()?;
    output.section(tab.title());
    match render(result, tab) {
        Panel::Chart(figure) => {
            output.kv("Labels", figure.labels.join(", "));
            for series in &figure.series {
                output.kv(
                    &series.name,
                    format!(
                        "[{}] {}",
                        series.color,
                        series
                            .values
                            .iter()
                            .map(|v| format!("{:.2}", v))
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                );
            }
        }
        Panel::Empty(reason) => output.warning(reason),
    }
    Ok(())
}
