//! Recording in-memory transport for unit tests

use crate::error::{CatalogError, CatalogResult};
use crate::transport::{ApiRequest, Transport, TransportResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Serves canned responses keyed by rendered path; unknown paths get 404
#[derive(Default)]
pub(crate) struct MockTransport {
    routes: HashMap<String, (u16, Vec<u8>)>,
    unreachable: bool,
    calls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request fails as if the connection was refused
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn with_json(self, path: &str, json: serde_json::Value) -> Self {
        self.with_response(path, 200, json.to_string().into_bytes())
    }

    pub fn with_response(mut self, path: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(path.to_string(), (status, body.into()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn respond(&self, request: &ApiRequest) -> CatalogResult<(u16, Vec<u8>)> {
        let path = request.render_path();
        self.calls.lock().unwrap().push(path.clone());

        if self.unreachable {
            return Err(CatalogError::Transport("connection refused".to_string()));
        }

        Ok(self
            .routes
            .get(&path)
            .cloned()
            .unwrap_or((404, b"{}".to_vec())))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, request: &ApiRequest) -> CatalogResult<TransportResponse> {
        let (status, body) = self.respond(request)?;
        Ok(TransportResponse { status, body })
    }

    async fn download(&self, request: &ApiRequest, output: &Path) -> CatalogResult<u16> {
        let (status, body) = self.respond(request)?;
        if status == 200 {
            tokio::fs::write(output, body).await?;
        }
        Ok(status)
    }
}
