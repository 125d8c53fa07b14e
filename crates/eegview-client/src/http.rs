//! Request/response transport over HTTP.

use async_trait::async_trait;
use eegview_core::config::ClientConfig;
use eegview_core::error::{EegviewError, Result};
use eegview_core::models::{AnalysisResult, AnalysisSettings, AnalysisStatus, DatasetDescriptor, UploadedFile};
use eegview_core::ports::{AnalysisTransport, UploadTransport};
use serde::{Deserialize, Serialize};

/// HTTP adapter for the upload and analysis endpoints.
///
/// Stateless between calls: in-flight requests are cancelled by dropping
/// their futures, and there is no automatic retry on either endpoint.
pub struct HttpBackend {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| EegviewError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> EegviewError {
        if err.is_timeout() {
            EegviewError::Timeout {
                after_secs: self.config.analysis_timeout.as_secs(),
            }
        } else {
            EegviewError::Network(err.to_string())
        }
    }

    /// Decode a response, turning non-2xx statuses into `Server` errors.
    ///
    /// Failed responses may carry a structured `{message}` body; when they
    /// do not, the HTTP status line is used instead. Nothing on this path
    /// propagates a raw reqwest error.
    async fn decode<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(EegviewError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        serde_json::from_str(&body).map_err(|e| EegviewError::Parse(e.to_string()))
    }
}

#[async_trait]
impl UploadTransport for HttpBackend {
    async fn upload(&self, file: &UploadedFile) -> Result<DatasetDescriptor> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        tracing::debug!(name = %file.name, size = file.size_bytes, "uploading recording");

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let descriptor: DatasetDescriptor = self.decode(response).await?;
        descriptor.validate_shape()?;
        Ok(descriptor)
    }
}

#[async_trait]
impl AnalysisTransport for HttpBackend {
    async fn analyze(
        &self,
        dataset: &DatasetDescriptor,
        settings: &AnalysisSettings,
    ) -> Result<AnalysisResult> {
        settings.validate()?;

        let request = ProcessRequest {
            file_path: &dataset.file_path,
            settings,
        };

        tracing::debug!(file_path = %dataset.file_path, "submitting analysis");

        let response = self
            .client
            .post(self.config.process_url())
            .timeout(self.config.analysis_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let result: AnalysisResult = self.decode(response).await?;
        match result.status {
            AnalysisStatus::Success => Ok(result),
            _ => Err(EegviewError::Server {
                status: 200,
                message: result
                    .message
                    .unwrap_or_else(|| "Analysis failed".to_string()),
            }),
        }
    }
}

/// Request body for the analysis endpoint
#[derive(Debug, Serialize)]
struct ProcessRequest<'a> {
    file_path: &'a str,
    settings: &'a AnalysisSettings,
}

/// Optional structured error payload on failed responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn dataset() -> DatasetDescriptor {
        let mut channels = BTreeMap::new();
        channels.insert("Cz".to_string(), vec![0.0; 4]);
        DatasetDescriptor {
            file_path: "uploads/rec.edf".to_string(),
            channel_count: 1,
            time: vec![0.0, 1.0, 2.0, 3.0],
            channels,
        }
    }

    #[test]
    fn process_request_matches_the_wire_contract() {
        let settings = AnalysisSettings::default();
        let d = dataset();
        let request = ProcessRequest {
            file_path: &d.file_path,
            settings: &settings,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["file_path"], "uploads/rec.edf");
        assert_eq!(value["settings"]["filterRange"][0], 1.0);
        assert_eq!(value["settings"]["notchFreq"], 50);
        assert_eq!(value["settings"]["analysisType"], "comprehensive");
        assert_eq!(value["settings"]["advancedSettings"]["filterType"], "butterworth");
    }

    #[tokio::test]
    async fn invalid_settings_fail_before_any_request() {
        let backend = HttpBackend::new(ClientConfig::default()).unwrap();
        let settings = AnalysisSettings {
            filter_range: [40.0, 1.0],
            ..Default::default()
        };
        // The backend URL is unroutable; a network attempt would not return
        // a Validation error.
        let err = backend.analyze(&dataset(), &settings).await.unwrap_err();
        assert!(matches!(err, EegviewError::Validation { .. }));
    }

    #[test]
    fn error_body_tolerates_missing_message() {
        let parsed: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(parsed.message.is_none());
        let parsed: ErrorBody =
            serde_json::from_str(r#"{"status":"error","message":"bad file"}"#).unwrap();
        assert_eq!(parsed.message.as_deref(), Some("bad file"));
    }
}
