//! HTTP transport seam
//!
//! The query engine talks to the service only through [`Transport`]. The
//! production implementation is [`HttpTransport`] (reqwest); tests substitute
//! a recording fake.

use crate::error::CatalogResult;
use crate::validation::STATUS_OK;
use acnh_common::ClientConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// A templated request against the catalog service
///
/// `path` holds `{name}` placeholders that the transport fills from
/// `path_params`, e.g. `/v{apiVersion}/songs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    path: &'static str,
    path_params: Vec<(&'static str, String)>,
    headers: Vec<(&'static str, &'static str)>,
}

impl ApiRequest {
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            path_params: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn path_param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.path_params.push((name, value.to_string()));
        self
    }

    pub fn header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn headers(&self) -> &[(&'static str, &'static str)] {
        &self.headers
    }

    /// Path with every known placeholder substituted
    pub fn render_path(&self) -> String {
        self.path_params
            .iter()
            .fold(self.path.to_string(), |path, (name, value)| {
                path.replace(&format!("{{{}}}", name), value)
            })
    }
}

/// Completed JSON request
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Request execution against the remote service
///
/// Implementations must surface connection failures as errors and hand back
/// every HTTP status unchanged; status interpretation belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a GET and return status and full body
    async fn get(&self, request: &ApiRequest) -> CatalogResult<TransportResponse>;

    /// Execute a GET and stream the body into `output`
    ///
    /// The file is only created when the status is 200. Returns the status.
    async fn download(&self, request: &ApiRequest, output: &Path) -> CatalogResult<u16>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> CatalogResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.render_path())
    }

    fn build(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        request
            .headers()
            .iter()
            .fold(self.client.get(self.url(request)), |builder, (name, value)| {
                builder.header(*name, *value)
            })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: &ApiRequest) -> CatalogResult<TransportResponse> {
        let response = self.build(request).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse { status, body })
    }

    async fn download(&self, request: &ApiRequest, output: &Path) -> CatalogResult<u16> {
        let mut response = self.build(request).send().await?;
        let status = response.status().as_u16();
        if status != STATUS_OK {
            return Ok(status);
        }

        let mut file = tokio::fs::File::create(output).await?;
        let mut written = 0usize;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len();
        }
        file.flush().await?;

        tracing::debug!(path = %output.display(), bytes = written, "Asset body written");
        Ok(status)
    }
}
