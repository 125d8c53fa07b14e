use crate::cli::{Cli, UploadArgs};
use crate::context;
use crate::errors;
use crate::output::OutputWriter;
use crate::progress::{create_spinner, finish_error, finish_success};
use anyhow::Result;
use eegview_client::HttpBackend;
use eegview_core::intake;
use eegview_core::ports::UploadTransport;
use eegview_core::session::Session;
use eegview_render::{dataset_trace, format_amplitude, MAX_TRACE_POINTS};
use eegview_store::SnapshotStore;
use tabled::Tabled;

#[derive(Tabled)]
struct ChannelRow {
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Samples")]
    samples: usize,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
}

pub async fn execute(args: &UploadArgs, output: &OutputWriter, cli: &Cli) -> Result<()> {
    let ctx = context::load(cli)?;

    // Intake: extension and size checks happen before any bytes are read,
    // and a rejection never touches the network.
    let file = match intake::prepare(&args.path, &ctx.config).await {
        Ok(file) => file,
        Err(err) => {
            output.error(&err);
            anyhow::bail!("upload rejected");
        }
    };

    output.kv("File", &file.name);
    output.kv("Format", format!(".{}", file.kind));
    output.kv("Size", format!("{:.1} KiB", file.size_bytes as f64 / 1024.0));

    let backend = match HttpBackend::new(ctx.config.clone()) {
        Ok(backend) => backend,
        Err(err) => {
            output.error(&err);
            anyhow::bail!("client setup failed");
        }
    };

    let mut session = Session::new();
    session.select_file();
    let generation = session.begin_upload();

    let spinner = create_spinner(&format!("Uploading {}...", file.name));
    let outcome = backend.upload(&file).await;
    let failure = outcome
        .as_ref()
        .err()
        .map(|err| errors::from_eegview(err, &ctx.config.base_url));
    session.complete_upload(generation, outcome);

    if let Some(cli_err) = failure {
        finish_error(&spinner, "Upload failed");
        cli_err.display();
        anyhow::bail!("upload failed");
    }
    finish_success(&spinner, "Upload complete");

    let descriptor = match session.dataset() {
        Some(descriptor) => descriptor,
        None => anyhow::bail!("upload finished without a dataset"),
    };

    // Persist the new page state: the fresh dataset replaces the previous
    // one and invalidates any stored results.
    ctx.store.save_dataset(descriptor)?;
    ctx.store.clear_result()?;

    output.success(format!(
        "Dataset ready: {} channel(s), {} samples, {:.1}s",
        descriptor.channel_count,
        descriptor.sample_count(),
        descriptor.duration_secs()
    ));
    output.kv("Stored as", &descriptor.file_path);

    let unit = &ctx.config.amplitude_unit;
    let rows: Vec<ChannelRow> = descriptor
        .channels
        .iter()
        .map(|(name, samples)| {
            let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
            let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            ChannelRow {
                channel: name.clone(),
                samples: samples.len(),
                min: format_amplitude(min, unit),
                max: format_amplitude(max, unit),
            }
        })
        .collect();
    output.table(rows);

    if args.preview {
        let trace = dataset_trace(descriptor, MAX_TRACE_POINTS);
        if output.is_json() {
            output.result(&trace)?;
        } else {
            output.section("Signal preview");
            for series in &trace.series {
                output.kv(
                    &series.name,
                    format!("{} points, color {}", series.points.len(), series.color),
                );
            }
        }
    } else if output.is_json() {
        output.result(descriptor)?;
    }

    output.info("Next: eegview analyze");
    Ok(())
}
