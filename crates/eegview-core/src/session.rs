//! Page-level session coordination.
//!
//! The session is a synchronous state machine; the async driver (CLI or UI
//! loop) starts operations against the transports and feeds completions back
//! in. Every in-flight operation carries a generation number, and a
//! completion is applied only if its generation is still the current one, so
//! overlapping user actions cannot interleave into an inconsistent state.

use crate::error::{EegviewError, Result};
use crate::models::{AnalysisResult, DatasetDescriptor};

/// Tag for an in-flight operation.
pub type Generation = u64;

/// Observable page state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    FileSelected,
    Uploading,
    DatasetReady,
    Submitting,
    ResultsReady,
}

/// Whether a completion was applied or discarded as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    Applied,
    Stale,
}

#[derive(Debug)]
pub struct Session {
    phase: SessionPhase,
    /// Phase to restore when the current operation fails
    return_phase: SessionPhase,
    dataset: Option<DatasetDescriptor>,
    result: Option<AnalysisResult>,
    next_generation: Generation,
    upload_generation: Option<Generation>,
    analysis_generation: Option<Generation>,
    last_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            return_phase: SessionPhase::Idle,
            dataset: None,
            result: None,
            next_generation: 0,
            upload_generation: None,
            analysis_generation: None,
            last_error: None,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a session from persisted page state.
    pub fn restore(dataset: Option<DatasetDescriptor>, result: Option<AnalysisResult>) -> Self {
        let phase = match (&dataset, &result) {
            (Some(_), Some(_)) => SessionPhase::ResultsReady,
            (Some(_), None) => SessionPhase::DatasetReady,
            _ => SessionPhase::Idle,
        };
        Self {
            phase,
            return_phase: phase,
            dataset,
            // A result without its dataset is unusable; drop it.
            result: result.filter(|_| phase != SessionPhase::Idle),
            ..Self::default()
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn dataset(&self) -> Option<&DatasetDescriptor> {
        self.dataset.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Last failure message, kept until the next successful completion.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_uploading(&self) -> bool {
        self.upload_generation.is_some()
    }

    pub fn is_processing(&self) -> bool {
        self.analysis_generation.is_some()
    }

    /// A file was chosen in the picker.
    pub fn select_file(&mut self) {
        if self.phase != SessionPhase::Uploading && self.phase != SessionPhase::Submitting {
            self.phase = SessionPhase::FileSelected;
        }
    }

    /// Start an upload. Starting another while one is in flight supersedes
    /// it: the earlier completion will be discarded as stale.
    pub fn begin_upload(&mut self) -> Generation {
        if self.phase != SessionPhase::Uploading {
            self.return_phase = self.phase;
        }
        self.phase = SessionPhase::Uploading;
        self.next_generation += 1;
        self.upload_generation = Some(self.next_generation);
        self.next_generation
    }

    /// Feed an upload completion back into the session.
    ///
    /// A stale generation leaves every piece of state untouched.
    pub fn complete_upload(
        &mut self,
        generation: Generation,
        outcome: Result<DatasetDescriptor>,
    ) -> CompletionOutcome {
        if self.upload_generation != Some(generation) {
            return CompletionOutcome::Stale;
        }
        self.upload_generation = None;

        match outcome {
            Ok(descriptor) => {
                self.dataset = Some(descriptor);
                // A fresh dataset invalidates any results computed from the
                // previous one.
                self.result = None;
                self.phase = SessionPhase::DatasetReady;
                self.last_error = None;
            }
            Err(err) => {
                self.phase = self.return_phase;
                self.last_error = Some(err.to_string());
            }
        }
        CompletionOutcome::Applied
    }

    /// Start an analysis. Rejected locally while another is outstanding or
    /// before any dataset has been uploaded.
    pub fn begin_analysis(&mut self) -> Result<Generation> {
        if self.analysis_generation.is_some() {
            return Err(EegviewError::AlreadyProcessing);
        }
        if self.dataset.is_none() {
            return Err(EegviewError::NoDataset);
        }
        self.return_phase = self.phase;
        self.phase = SessionPhase::Submitting;
        self.next_generation += 1;
        self.analysis_generation = Some(self.next_generation);
        Ok(self.next_generation)
    }

    /// Feed an analysis completion back into the session.
    ///
    /// On failure the previous result, if any, stays rendered: a failed
    /// re-analysis never blanks previously valid data.
    pub fn complete_analysis(
        &mut self,
        generation: Generation,
        outcome: Result<AnalysisResult>,
    ) -> CompletionOutcome {
        if self.analysis_generation != Some(generation) {
            return CompletionOutcome::Stale;
        }
        self.analysis_generation = None;

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.phase = SessionPhase::ResultsReady;
                self.last_error = None;
            }
            Err(err) => {
                self.phase = self.return_phase;
                self.last_error = Some(err.to_string());
            }
        }
        CompletionOutcome::Applied
    }

    /// Explicit teardown (navigation away): drops in-flight generations so
    /// late completions are ignored.
    pub fn reset(&mut self) {
        *self = Session::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisResult, AnalysisStatus, DatasetDescriptor};
    use std::collections::BTreeMap;

    fn dataset(path: &str) -> DatasetDescriptor {
        let mut channels = BTreeMap::new();
        channels.insert("Cz".to_string(), vec![0.0, 1.0]);
        DatasetDescriptor {
            file_path: path.to_string(),
            channel_count: 1,
            time: vec![0.0, 0.004],
            channels,
        }
    }

    fn result() -> AnalysisResult {
        AnalysisResult {
            status: AnalysisStatus::Success,
            message: None,
            features: None,
        }
    }

    #[test]
    fn happy_path_walks_the_state_machine() {
        let mut session = Session::new();
        assert_eq!(session.phase(), SessionPhase::Idle);

        session.select_file();
        assert_eq!(session.phase(), SessionPhase::FileSelected);

        let gen = session.begin_upload();
        assert_eq!(session.phase(), SessionPhase::Uploading);
        assert!(session.is_uploading());

        let outcome = session.complete_upload(gen, Ok(dataset("a.edf")));
        assert_eq!(outcome, CompletionOutcome::Applied);
        assert_eq!(session.phase(), SessionPhase::DatasetReady);

        let gen = session.begin_analysis().unwrap();
        assert!(session.is_processing());

        session.complete_analysis(gen, Ok(result()));
        assert_eq!(session.phase(), SessionPhase::ResultsReady);
        assert!(session.result().is_some());
    }

    #[test]
    fn stale_upload_is_ignored_regardless_of_resolution_order() {
        let mut session = Session::new();
        session.select_file();

        let first = session.begin_upload();
        let second = session.begin_upload();

        // First started, resolves late: discarded.
        assert_eq!(
            session.complete_upload(first, Ok(dataset("first.edf"))),
            CompletionOutcome::Stale
        );
        assert!(session.dataset().is_none());
        assert_eq!(session.phase(), SessionPhase::Uploading);

        assert_eq!(
            session.complete_upload(second, Ok(dataset("second.edf"))),
            CompletionOutcome::Applied
        );
        assert_eq!(session.dataset().unwrap().file_path, "second.edf");
    }

    #[test]
    fn stale_upload_is_ignored_when_newer_finishes_first() {
        let mut session = Session::new();
        session.select_file();

        let first = session.begin_upload();
        let second = session.begin_upload();

        assert_eq!(
            session.complete_upload(second, Ok(dataset("second.edf"))),
            CompletionOutcome::Applied
        );
        // The older completion arrives after the newer one already settled.
        assert_eq!(
            session.complete_upload(first, Ok(dataset("first.edf"))),
            CompletionOutcome::Stale
        );
        assert_eq!(session.dataset().unwrap().file_path, "second.edf");
        assert_eq!(session.phase(), SessionPhase::DatasetReady);
    }

    #[test]
    fn upload_failure_restores_prior_phase() {
        let mut session = Session::new();
        session.select_file();
        let gen = session.begin_upload();
        session.complete_upload(gen, Err(EegviewError::Network("refused".into())));

        assert_eq!(session.phase(), SessionPhase::FileSelected);
        assert!(session.last_error().unwrap().contains("refused"));
    }

    #[test]
    fn analysis_failure_keeps_dataset_and_previous_result() {
        let mut session = Session::new();
        let gen = session.begin_upload();
        session.complete_upload(gen, Ok(dataset("a.edf")));

        let gen = session.begin_analysis().unwrap();
        session.complete_analysis(gen, Ok(result()));
        assert!(session.result().is_some());

        // Re-analysis fails: the old result stays rendered.
        let gen = session.begin_analysis().unwrap();
        session.complete_analysis(
            gen,
            Err(EegviewError::Timeout { after_secs: 300 }),
        );
        assert_eq!(session.phase(), SessionPhase::ResultsReady);
        assert!(session.dataset().is_some());
        assert!(session.result().is_some());
        assert!(session.last_error().unwrap().contains("300"));
    }

    #[test]
    fn double_submit_is_rejected_locally() {
        let mut session = Session::new();
        let gen = session.begin_upload();
        session.complete_upload(gen, Ok(dataset("a.edf")));

        let _outstanding = session.begin_analysis().unwrap();
        let err = session.begin_analysis().unwrap_err();
        assert!(matches!(err, EegviewError::AlreadyProcessing));
    }

    #[test]
    fn analysis_without_dataset_is_rejected() {
        let mut session = Session::new();
        assert!(matches!(
            session.begin_analysis().unwrap_err(),
            EegviewError::NoDataset
        ));
    }

    #[test]
    fn new_dataset_clears_stale_results() {
        let mut session = Session::new();
        let gen = session.begin_upload();
        session.complete_upload(gen, Ok(dataset("a.edf")));
        let gen = session.begin_analysis().unwrap();
        session.complete_analysis(gen, Ok(result()));

        let gen = session.begin_upload();
        session.complete_upload(gen, Ok(dataset("b.edf")));
        assert!(session.result().is_none());
        assert_eq!(session.dataset().unwrap().file_path, "b.edf");
    }
}
