use console::style;
use eegview_core::EegviewError;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a missing profile
pub fn profile_not_found() -> CliError {
    let current_dir = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    CliError::new("Not in an eegview profile")
        .with_context(format!(
            "No .eegview directory was found here or in any parent directory.\n\nCurrent directory: {}",
            current_dir
        ))
        .with_suggestion("Initialize a profile: eegview init")
        .with_suggestion("Or navigate to a directory that has one")
        .with_help("Run: eegview init --help")
}

/// Create error for an unreachable backend
pub fn backend_unreachable(base_url: &str, detail: &str) -> CliError {
    CliError::new("Cannot reach the analysis backend")
        .with_context(format!(
            "The backend at {} did not answer.\n\nError: {}",
            base_url, detail
        ))
        .with_suggestion("Check that the backend is running")
        .with_suggestion(
            "Or point at a different backend: eegview --base-url http://host:port ... \
             (EEGVIEW_BASE_URL and the profile's config.toml work too)",
        )
        .with_help("Run: eegview status")
}

/// Create error for a missing dataset
pub fn no_dataset() -> CliError {
    CliError::new("No dataset uploaded")
        .with_context("Analysis needs an uploaded recording, and this profile has none.")
        .with_suggestion("Upload a recording: eegview upload recording.edf")
        .with_suggestion("Check current state: eegview status")
        .with_help("Run: eegview upload --help")
}

/// Create error for missing analysis results
pub fn no_result() -> CliError {
    CliError::new("No analysis results")
        .with_context("Nothing has been analyzed yet for this profile.")
        .with_suggestion("Run an analysis: eegview analyze")
        .with_help("Run: eegview analyze --help")
}

/// Create error for invalid settings, one line per offending field
pub fn invalid_settings(fields: &std::collections::BTreeMap<String, String>) -> CliError {
    let mut error = CliError::new("Settings validation failed").with_context(
        fields
            .iter()
            .map(|(field, message)| format!("  {}: {}", field, message))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    error = error
        .with_suggestion("Fix the fields above: eegview settings edit")
        .with_help("Run: eegview settings show");
    error
}

/// Create error for an analysis timeout
pub fn analysis_timeout(after_secs: u64) -> CliError {
    CliError::new("Analysis timed out")
        .with_context(format!(
            "The backend did not answer within {}s.",
            after_secs
        ))
        .with_suggestion("Retry: eegview analyze")
        .with_suggestion("Or raise the limit: eegview --timeout-secs 600 analyze")
        .with_help("Run: eegview status")
}

/// Map a pipeline error to a suggestion-carrying CLI error.
pub fn from_eegview(err: &EegviewError, base_url: &str) -> CliError {
    match err {
        EegviewError::Validation { fields } => invalid_settings(fields),
        EegviewError::NoDataset => no_dataset(),
        EegviewError::Network(detail) => backend_unreachable(base_url, detail),
        EegviewError::Timeout { after_secs } => analysis_timeout(*after_secs),
        EegviewError::NotConnected => CliError::new("Analysis channel is not connected")
            .with_context("The persistent channel dropped before the job could be sent.")
            .with_suggestion("Retry: eegview analyze --transport socket")
            .with_suggestion("Or use the request/response transport: eegview analyze")
            .with_help("Run: eegview status"),
        EegviewError::Server { status, message } => {
            CliError::new("The backend rejected the request").with_context(format!(
                "Status {}: {}",
                status, message
            ))
        }
        other => CliError::new(other.to_string()),
    }
}
