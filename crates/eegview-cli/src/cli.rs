use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// eegview - EEG visualization client
#[derive(Parser, Debug)]
#[command(name = "eegview")]
#[command(about = "Upload EEG recordings, run remote analyses, and view the results", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Backend base URL (overrides config file and environment)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// WebSocket URL for the persistent channel
    #[arg(long, global = true)]
    pub socket_url: Option<String>,

    /// Analysis timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Transport used for analysis requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TransportKind {
    /// Single request/response call
    Http,
    /// Persistent WebSocket channel
    Socket,
}

/// Visualization tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TabArg {
    BandPowers,
    Temporal,
    Connectivity,
}

impl From<TabArg> for eegview_render::Tab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::BandPowers => eegview_render::Tab::BandPowers,
            TabArg::Temporal => eegview_render::Tab::Temporal,
            TabArg::Connectivity => eegview_render::Tab::Connectivity,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize an eegview profile
    Init(InitArgs),

    /// Validate and upload a recording
    Upload(UploadArgs),

    /// Run a remote analysis on the uploaded recording
    Analyze(AnalyzeArgs),

    /// Render analysis results as chart data
    Show(ShowArgs),

    /// Inspect or change analysis settings
    Settings(SettingsArgs),

    /// Inspect or change the theme preference
    Theme(ThemeArgs),

    /// Show profile, dataset, and configuration status
    Status(StatusArgs),

    /// Interactive upload/analyze/view loop
    Session(SessionArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Profile parent directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Force re-initialization if a profile already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct UploadArgs {
    /// Path to the recording (.edf, .bdf, .gdf, .set, .eeg)
    pub path: PathBuf,

    /// Print a decimated signal preview after the upload
    #[arg(long)]
    pub preview: bool,
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Transport for the analysis request
    #[arg(long, value_enum, default_value = "http")]
    pub transport: TransportKind,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Tab to render (all tabs if not specified)
    #[arg(long, value_enum)]
    pub tab: Option<TabArg>,

    /// Write the chart data as JSON to a file
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the current settings
    Show,

    /// Change one setting
    Set(SettingsSetArgs),

    /// Edit settings interactively
    Edit,

    /// Restore the default settings
    Reset,
}

#[derive(Parser, Debug)]
pub struct SettingsSetArgs {
    /// Setting key (filter-low, filter-high, notch, type, bands, ica)
    pub key: String,

    /// New value
    pub value: String,
}

#[derive(Parser, Debug)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: ThemeCommand,
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommand {
    /// Print the stored preference and the resolved chart colors
    Show,

    /// Store a preference (light, dark, or system)
    Set(ThemeSetArgs),
}

#[derive(Parser, Debug)]
pub struct ThemeSetArgs {
    /// light, dark, or system
    pub preference: String,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Show per-value configuration sources
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
pub struct SessionArgs {
    /// Transport for analyses started inside the session
    #[arg(long, value_enum, default_value = "http")]
    pub transport: TransportKind,
}
