//! Transport port definitions
//!
//! The pipeline talks to the analysis backend through these traits; the
//! concrete HTTP and WebSocket adapters live in `eegview-client`.

use crate::error::Result;
use crate::models::{
    AnalysisResult, AnalysisSettings, ConnectionState, DatasetDescriptor, UploadedFile,
};
use async_trait::async_trait;

/// Port for transferring a validated recording to the backend.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Upload a recording and resolve to its normalized descriptor.
    ///
    /// No automatic retry: repeated submission is user-triggered. The
    /// in-flight call is cancelled by dropping the returned future.
    async fn upload(&self, file: &UploadedFile) -> Result<DatasetDescriptor>;
}

/// Port for invoking a remote analysis, satisfied by both the
/// request/response and the persistent-channel transports.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Run an analysis for an uploaded dataset.
    ///
    /// Implementations must validate `settings` locally before touching the
    /// network and must map every transport failure into the crate's error
    /// taxonomy.
    async fn analyze(
        &self,
        dataset: &DatasetDescriptor,
        settings: &AnalysisSettings,
    ) -> Result<AnalysisResult>;
}

/// Messages surfaced by the persistent analysis channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// Connection (re-)established
    Connected,
    /// Analysis payload arrived
    Result(AnalysisResult),
    /// Backend-reported error event
    Error(String),
    /// Connection dropped; the adapter decides whether to reconnect
    Disconnected,
}

/// Port over the persistent analysis channel.
///
/// A job sent while not connected fails fast with `NotConnected`; jobs are
/// never queued for a future connection.
#[async_trait]
pub trait AnalysisChannel: Send {
    /// Establish the connection, applying the reconnect policy.
    async fn connect(&mut self) -> Result<()>;

    /// Emit an analysis job for a previously uploaded dataset.
    async fn send_job(
        &mut self,
        dataset: &DatasetDescriptor,
        settings: &AnalysisSettings,
    ) -> Result<()>;

    /// Wait for the next inbound event.
    async fn next_event(&mut self) -> Result<ChannelEvent>;

    /// Release the channel. Idempotent.
    async fn close(&mut self) -> Result<()>;

    fn state(&self) -> ConnectionState;
}
