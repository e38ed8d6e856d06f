//! HTTP implementation of [`Backend`] on top of `reqwest`.
//!
//! In the browser requests go through `fetch`; on desktop through the native
//! client with the configured timeout. Response bodies are decoded as JSON
//! whatever the HTTP status, since the server reports failures in the body.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::config::ApiConfig;
use super::controller::Backend;
use super::error::{AnalyzerError, Result};
use super::protocol::{AnalyzeReply, AnalyzeRequest, UploadFile, UploadReply};

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    api: ApiConfig,
}

impl HttpBackend {
    pub fn new(api: ApiConfig) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(api.timeout_secs.max(1)));
        let client = builder.build().unwrap_or_else(|err| {
            tracing::warn!("http client setup failed ({err}); using defaults");
            Client::new()
        });
        Self { client, api }
    }

    pub fn upload_url(&self) -> Result<Url> {
        self.api.upload_url()
    }

    pub fn analyze_url(&self) -> Result<Url> {
        self.api.analyze_url()
    }
}

impl Backend for HttpBackend {
    async fn upload(&self, file: &UploadFile) -> Result<UploadReply> {
        let url = self.upload_url()?;
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part(UPLOAD_FIELD, part);

        debug!(%url, "POST upload");
        let response = self.client.post(url).multipart(form).send().await?;
        decode(response).await
    }

    async fn analyze(&self, request: &AnalyzeRequest<'_>) -> Result<AnalyzeReply> {
        let url = self.analyze_url()?;
        debug!(%url, "POST analyze");
        let response = self.client.post(url).json(request).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| {
        AnalyzerError::malformed(format!("HTTP {status}: {err}"))
    })
}
