//! Catalog client
//!
//! Owns the configuration and transport; hands out per-catalog query handles.

use crate::error::CatalogResult;
use crate::models::{BgmTrack, Song};
use crate::query::Catalog;
use crate::transport::{HttpTransport, Transport};
use acnh_common::ClientConfig;
use tracing::info;

/// ACNH API client
///
/// ```no_run
/// # async fn run() -> acnh_catalog::CatalogResult<()> {
/// use acnh_catalog::{CatalogClient, Weather};
/// use acnh_common::ClientConfig;
///
/// let client = CatalogClient::new(ClientConfig::default())?;
/// let track = client.tracks().by_hour_and_weather(18, Weather::Rainy).await?;
/// let path = client.tracks().download_to_temp(&track).await?;
/// # let _ = path;
/// # Ok(())
/// # }
/// ```
pub struct CatalogClient {
    config: ClientConfig,
    transport: Box<dyn Transport>,
}

impl CatalogClient {
    /// Create a client backed by the reqwest transport
    pub fn new(config: ClientConfig) -> CatalogResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;

        info!(
            base_url = %config.base_url,
            api_version = config.api_version,
            "Catalog client created"
        );

        Ok(Self {
            config,
            transport: Box::new(transport),
        })
    }

    /// Create a client over a caller-supplied transport
    pub fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> CatalogResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            transport: Box::new(transport),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Background music catalog
    pub fn tracks(&self) -> Catalog<'_, BgmTrack> {
        Catalog::new(self.transport.as_ref(), self.config.api_version)
    }

    /// Song catalog
    pub fn songs(&self) -> Catalog<'_, Song> {
        Catalog::new(self.transport.as_ref(), self.config.api_version)
    }
}
