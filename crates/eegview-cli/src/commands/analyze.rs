use crate::cli::{AnalyzeArgs, Cli, TransportKind};
use crate::context::{self, AppContext};
use crate::errors;
use crate::output::OutputWriter;
use crate::progress::{create_spinner, finish_error, finish_success};
use anyhow::Result;
use eegview_client::{HttpBackend, SocketBackend};
use eegview_core::models::{AnalysisResult, AnalysisSettings, DatasetDescriptor};
use eegview_core::ports::AnalysisTransport;
use eegview_core::session::Session;
use eegview_core::Result as CoreResult;
use eegview_render::{render, Tab};
use eegview_store::{SettingsStore, SnapshotStore};

pub async fn execute(args: &AnalyzeArgs, output: &OutputWriter, cli: &Cli) -> Result<()> {
    let ctx = context::load(cli)?;

    let descriptor = match ctx.store.load_dataset()? {
        Some(snapshot) => snapshot.descriptor,
        None => {
            errors::no_dataset().display();
            anyhow::bail!("no dataset");
        }
    };
    let settings = SettingsStore::load(&ctx.store)?.unwrap_or_default();

    // Pre-flight validation before anything is constructed: a bad form
    // never produces network traffic.
    if let Err(err) = settings.validate() {
        errors::from_eegview(&err, &ctx.config.base_url).display();
        anyhow::bail!("invalid settings");
    }

    let previous_result = ctx.store.load_result()?.map(|s| s.result);
    let mut session = Session::restore(Some(descriptor), previous_result);

    let generation = match session.begin_analysis() {
        Ok(generation) => generation,
        Err(err) => {
            errors::from_eegview(&err, &ctx.config.base_url).display();
            anyhow::bail!("analysis not started");
        }
    };

    describe_job(output, &settings, session.dataset(), args.transport);

    let spinner = create_spinner("Running analysis...");
    let outcome = run_transport(args.transport, &ctx, &session, &settings, &spinner).await;
    let failure = outcome
        .as_ref()
        .err()
        .map(|err| errors::from_eegview(err, &ctx.config.base_url));
    session.complete_analysis(generation, outcome);

    if let Some(cli_err) = failure {
        finish_error(&spinner, "Analysis failed");
        cli_err.display();
        anyhow::bail!("analysis failed");
    }
    finish_success(&spinner, "Analysis complete");

    if let Some(result) = session.result() {
        // Replaces any previous result wholesale.
        ctx.store.save_result(result)?;
        summarize(output, result);
        if output.is_json() {
            output.result(result)?;
        }
        output.info("View charts: eegview show");
    }
    Ok(())
}

async fn run_transport(
    transport: TransportKind,
    ctx: &AppContext,
    session: &Session,
    settings: &AnalysisSettings,
    spinner: &indicatif::ProgressBar,
) -> CoreResult<AnalysisResult> {
    let dataset = session.dataset().ok_or(eegview_core::EegviewError::NoDataset)?;
    match transport {
        TransportKind::Http => {
            let backend = HttpBackend::new(ctx.config.clone())?;
            backend.analyze(dataset, settings).await
        }
        TransportKind::Socket => {
            spinner.set_message(format!("Connecting to {}...", ctx.config.channel_url()));
            let backend = SocketBackend::new(&ctx.config);
            backend.connect().await?;
            spinner.set_message("Running analysis...");
            let outcome = backend.analyze(dataset, settings).await;
            // Explicit teardown releases the channel whatever the outcome.
            let _ = backend.close().await;
            outcome
        }
    }
}

fn describe_job(
    output: &OutputWriter,
    settings: &AnalysisSettings,
    dataset: Option<&DatasetDescriptor>,
    transport: TransportKind,
) {
    output.section("Analysis");
    if let Some(descriptor) = dataset {
        output.kv("Recording", &descriptor.file_path);
        output.kv("Channels", descriptor.channel_count);
    }
    output.kv(
        "Filter range",
        format!("{}-{} Hz", settings.filter_range[0], settings.filter_range[1]),
    );
    output.kv("Notch", settings.notch_freq);
    output.kv("Type", settings.analysis_type);
    if !settings.custom_bands.is_empty() {
        output.kv("Bands", &settings.custom_bands);
    }
    output.kv("ICA", if settings.apply_ica { "on" } else { "off" });
    output.kv(
        "Transport",
        match transport {
            TransportKind::Http => "http",
            TransportKind::Socket => "socket",
        },
    );
}

fn summarize(output: &OutputWriter, result: &AnalysisResult) {
    let channels = result.channel_names().map(<[String]>::len).unwrap_or(0);
    output.success(format!("Analysis completed for {} channel(s)", channels));
    for tab in Tab::ALL {
        match render(result, tab) {
            eegview_render::Panel::Chart(figure) => {
                output.kv(tab.title(), format!("{} series", figure.series.len()));
            }
            eegview_render::Panel::Empty(reason) => {
                output.kv(tab.title(), reason);
            }
        }
    }
}
