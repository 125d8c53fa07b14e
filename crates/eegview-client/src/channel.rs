//! Persistent-channel transport over WebSocket.
//!
//! Wire protocol: JSON envelopes `{"event": ..., "data": ...}`. Outbound
//! jobs are `process_eeg`; inbound results arrive as `eeg_data`, whose
//! payload may be a JSON object or a JSON-encoded string (the backend emits
//! both), so the payload is parsed in two steps.

use async_trait::async_trait;
use eegview_core::config::ClientConfig;
use eegview_core::error::{EegviewError, Result};
use eegview_core::models::{
    AnalysisResult, AnalysisSettings, ConnectionState, DatasetDescriptor, ReconnectPolicy,
};
use eegview_core::ports::{AnalysisChannel, AnalysisTransport, ChannelEvent};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket channel to the analysis backend.
pub struct SocketChannel {
    url: String,
    policy: ReconnectPolicy,
    state: ConnectionState,
    stream: Option<WsStream>,
}

impl SocketChannel {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            url: config.channel_url(),
            policy: ReconnectPolicy {
                max_attempts: config.reconnect_attempts,
                delay: config.reconnect_delay,
            },
            state: ConnectionState::Disconnected,
            stream: None,
        }
    }

    fn mark_disconnected(&mut self) {
        self.stream = None;
        if self.state != ConnectionState::Failed {
            self.state = ConnectionState::Disconnected;
        }
    }
}

#[async_trait]
impl AnalysisChannel for SocketChannel {
    /// Connect, retrying on the configured policy. Once the attempt budget
    /// is exhausted the channel enters the terminal `Failed` state and the
    /// caller must reconnect explicitly.
    async fn connect(&mut self) -> Result<()> {
        self.state = ConnectionState::Connecting;
        let mut attempt = 0u32;
        loop {
            match connect_async(self.url.as_str()).await {
                Ok((stream, _response)) => {
                    self.stream = Some(stream);
                    self.state = ConnectionState::Connected;
                    tracing::info!(url = %self.url, "analysis channel connected");
                    return Ok(());
                }
                Err(err) => {
                    attempt += 1;
                    match self.policy.delay_for(attempt) {
                        Some(delay) => {
                            tracing::warn!(
                                url = %self.url,
                                attempt,
                                "connection failed ({}), retrying in {:?}",
                                err,
                                delay
                            );
                            self.state = ConnectionState::Reconnecting { attempt };
                            tokio::time::sleep(delay).await;
                        }
                        None => {
                            self.state = ConnectionState::Failed;
                            return Err(EegviewError::Network(format!(
                                "connection to {} failed after {} attempts: {}",
                                self.url, attempt, err
                            )));
                        }
                    }
                }
            }
        }
    }

    /// Emit a job. Fails fast with `NotConnected` while disconnected; jobs
    /// are never queued for a future connection.
    async fn send_job(
        &mut self,
        dataset: &DatasetDescriptor,
        settings: &AnalysisSettings,
    ) -> Result<()> {
        settings.validate()?;

        if !self.state.is_connected() {
            return Err(EegviewError::NotConnected);
        }
        let stream = self.stream.as_mut().ok_or(EegviewError::NotConnected)?;

        let envelope = Envelope {
            event: "process_eeg".to_string(),
            data: Some(serde_json::to_value(JobData {
                file_path: &dataset.file_path,
                settings,
            })
            .map_err(|e| EegviewError::Serialization(e.to_string()))?),
        };
        let text = serde_json::to_string(&envelope)
            .map_err(|e| EegviewError::Serialization(e.to_string()))?;

        if let Err(err) = stream.send(Message::Text(text)).await {
            self.mark_disconnected();
            return Err(EegviewError::Network(format!("send failed: {}", err)));
        }
        Ok(())
    }

    async fn next_event(&mut self) -> Result<ChannelEvent> {
        loop {
            let stream = match self.stream.as_mut() {
                Some(stream) => stream,
                None => return Err(EegviewError::NotConnected),
            };

            match stream.next().await {
                None => {
                    self.mark_disconnected();
                    return Ok(ChannelEvent::Disconnected);
                }
                Some(Err(err)) => {
                    self.mark_disconnected();
                    return Err(EegviewError::Network(format!("receive failed: {}", err)));
                }
                Some(Ok(Message::Close(_))) => {
                    self.mark_disconnected();
                    return Ok(ChannelEvent::Disconnected);
                }
                Some(Ok(Message::Text(text))) => {
                    if let Some(event) = parse_inbound(&text)? {
                        return Ok(event);
                    }
                    // Unrecognized event name: skip and keep listening.
                }
                // Pings are answered by the library; binary frames are not
                // part of the protocol.
                Some(Ok(_)) => {}
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            // Best effort: the peer may already be gone.
            let _ = stream.close(None).await;
        }
        self.state = ConnectionState::Disconnected;
        Ok(())
    }

    fn state(&self) -> ConnectionState {
        self.state
    }
}

/// Decode one inbound frame. Returns `Ok(None)` for event names outside the
/// protocol so the read loop can skip them.
fn parse_inbound(text: &str) -> Result<Option<ChannelEvent>> {
    let envelope: Envelope = serde_json::from_str(text)
        .map_err(|e| EegviewError::Parse(format!("invalid channel frame: {}", e)))?;

    match envelope.event.as_str() {
        "eeg_data" => {
            let data = envelope
                .data
                .ok_or_else(|| EegviewError::Parse("eeg_data frame without payload".to_string()))?;
            Ok(Some(ChannelEvent::Result(parse_result_payload(&data)?)))
        }
        "connect" => Ok(Some(ChannelEvent::Connected)),
        "connect_error" | "error" => {
            let message = envelope
                .data
                .as_ref()
                .and_then(|d| d.as_str().map(str::to_string).or_else(|| {
                    d.get("message").and_then(Value::as_str).map(str::to_string)
                }))
                .unwrap_or_else(|| envelope.event.clone());
            Ok(Some(ChannelEvent::Error(message)))
        }
        other => {
            tracing::debug!(event = other, "ignoring unrecognized channel event");
            Ok(None)
        }
    }
}

/// The `eeg_data` payload is either a JSON object or a JSON-encoded string.
fn parse_result_payload(data: &Value) -> Result<AnalysisResult> {
    match data {
        Value::String(text) => serde_json::from_str(text)
            .map_err(|e| EegviewError::Parse(format!("invalid eeg_data payload: {}", e))),
        other => serde_json::from_value(other.clone())
            .map_err(|e| EegviewError::Parse(format!("invalid eeg_data payload: {}", e))),
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

#[derive(Debug, Serialize)]
struct JobData<'a> {
    file_path: &'a str,
    settings: &'a AnalysisSettings,
}

/// Analysis transport over the persistent channel.
///
/// Serializes jobs: a second `analyze` while one is outstanding is rejected
/// locally with `AlreadyProcessing`.
pub struct SocketBackend {
    channel: tokio::sync::Mutex<SocketChannel>,
    timeout: Duration,
}

impl SocketBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            channel: tokio::sync::Mutex::new(SocketChannel::new(config)),
            timeout: config.analysis_timeout,
        }
    }

    /// Establish the channel up front so jobs can fail fast afterwards.
    pub async fn connect(&self) -> Result<()> {
        self.channel.lock().await.connect().await
    }

    pub async fn close(&self) -> Result<()> {
        self.channel.lock().await.close().await
    }

    pub async fn state(&self) -> ConnectionState {
        self.channel.lock().await.state()
    }
}

#[async_trait]
impl AnalysisTransport for SocketBackend {
    async fn analyze(
        &self,
        dataset: &DatasetDescriptor,
        settings: &AnalysisSettings,
    ) -> Result<AnalysisResult> {
        settings.validate()?;

        let mut channel = self
            .channel
            .try_lock()
            .map_err(|_| EegviewError::AlreadyProcessing)?;

        channel.send_job(dataset, settings).await?;

        let after_secs = self.timeout.as_secs();
        tokio::time::timeout(self.timeout, async {
            loop {
                match channel.next_event().await? {
                    ChannelEvent::Result(result) => return Ok(result),
                    // Backend-reported failure: no HTTP status on the
                    // channel, so 0 stands in.
                    ChannelEvent::Error(message) => {
                        return Err(EegviewError::Server { status: 0, message })
                    }
                    ChannelEvent::Disconnected => return Err(EegviewError::NotConnected),
                    ChannelEvent::Connected => {}
                }
            }
        })
        .await
        .map_err(|_| EegviewError::Timeout { after_secs })?
    }
}
