use crate::api::logging::{debug_stream_enabled, emit_request_payload};
use crate::config::Config;
use crate::types::{AskRequest, BackendAck};
use anyhow::{anyhow, Result};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::pin::Pin;
#[cfg(test)]
use std::sync::Arc;

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Test seam: lets conversation tests script the answer stream and the
/// upload/reset acknowledgements without a live backend.
#[cfg(test)]
pub trait MockBackend: Send + Sync {
    fn create_mock_stream(&self, request: &AskRequest<'_>) -> Result<ByteStream>;
    fn upload_ack(&self, file_name: &str) -> Result<BackendAck>;
    fn reset_ack(&self) -> Result<BackendAck>;
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    #[cfg(test)]
    mock_backend: Option<Arc<dyn MockBackend>>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.server_url.trim_end_matches('/').to_string(),
            #[cfg(test)]
            mock_backend: None,
        }
    }

    #[cfg(test)]
    pub fn new_mock(mock_backend: Arc<dyn MockBackend>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "http://localhost:8080".to_string(),
            mock_backend: Some(mock_backend),
        }
    }

    /// Opens the streamed answer for one question. A non-2xx status is a
    /// failure here, before any frame is consumed.
    pub async fn ask(&self, request: &AskRequest<'_>) -> Result<ByteStream> {
        #[cfg(test)]
        {
            if let Some(backend) = &self.mock_backend {
                return backend.create_mock_stream(request);
            }
        }

        let request_url = self.endpoint("/api/ask");
        if debug_stream_enabled() {
            if let Ok(payload) = serde_json::to_value(request) {
                emit_request_payload(&request_url, &payload);
            }
        }

        let response = self
            .http
            .post(&request_url)
            .json(request)
            .send()
            .await
            .map_err(|error| map_request_error(error, &request_url))?
            .error_for_status()
            .map_err(|error| map_request_error(error, &request_url))?;

        let request_url_for_stream = request_url.clone();
        let stream = response.bytes_stream().map(move |item| {
            item.map_err(|error| map_request_error(error, &request_url_for_stream))
        });
        Ok(Box::pin(stream))
    }

    /// Sends one document to the knowledge base. The file travels as the
    /// multipart `file` field under its original name, which the backend
    /// echoes in its success message.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<BackendAck> {
        #[cfg(test)]
        {
            if let Some(backend) = &self.mock_backend {
                return backend.upload_ack(file_name);
            }
        }

        let request_url = self.endpoint("/api/upload");
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&request_url)
            .multipart(form)
            .send()
            .await
            .map_err(|error| map_request_error(error, &request_url))?
            .error_for_status()
            .map_err(|error| map_request_error(error, &request_url))?;

        response
            .json::<BackendAck>()
            .await
            .map_err(|error| map_request_error(error, &request_url))
    }

    /// Asks the backend to forget every learned document.
    pub async fn reset(&self) -> Result<BackendAck> {
        #[cfg(test)]
        {
            if let Some(backend) = &self.mock_backend {
                return backend.reset_ack();
            }
        }

        let request_url = self.endpoint("/api/reset");
        let response = self
            .http
            .post(&request_url)
            .send()
            .await
            .map_err(|error| map_request_error(error, &request_url))?
            .error_for_status()
            .map_err(|error| map_request_error(error, &request_url))?;

        response
            .json::<BackendAck>()
            .await
            .map_err(|error| map_request_error(error, &request_url))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub fn document_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "document".to_string())
}

fn map_request_error(error: reqwest::Error, request_url: &str) -> anyhow::Error {
    if error.is_connect() {
        return anyhow!(
            "cannot reach server '{}': {}. Start the chat backend or set ASKDOC_SERVER_URL.",
            request_url,
            error
        );
    }
    if error.is_timeout() {
        return anyhow!("request to '{}' timed out: {}", request_url, error);
    }
    if let Some(status) = error.status() {
        return anyhow!(
            "server '{}' returned HTTP {}: {}",
            request_url,
            status,
            error
        );
    }
    anyhow!("request to '{}' failed: {}", request_url, error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_url(server_url: &str) -> Config {
        Config {
            server_url: server_url.to_string(),
            history_window: 20,
            plain_output: false,
        }
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = ApiClient::new(&config_with_url("http://localhost:8080"));
        assert_eq!(client.endpoint("/api/ask"), "http://localhost:8080/api/ask");
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = ApiClient::new(&config_with_url("http://localhost:8080/"));
        assert_eq!(
            client.endpoint("/api/reset"),
            "http://localhost:8080/api/reset"
        );
    }

    #[test]
    fn test_document_file_name_keeps_original_name() {
        assert_eq!(
            document_file_name(Path::new("/tmp/reports/q3 report.pdf")),
            "q3 report.pdf"
        );
        assert_eq!(document_file_name(Path::new("notes.docx")), "notes.docx");
    }
}
