//! Read-through client for the ACNH music catalogs
//!
//! Two catalogs are exposed: hourly background music ([`BgmTrack`]) and
//! K.K. Slider songs ([`Song`]). Each query fetches the full collection from
//! the service, filters it, and optionally downloads the matched record's MP3.
//! Nothing is cached between calls.

pub mod client;
pub mod download;
pub mod error;
pub mod models;
pub mod query;
pub mod transport;
pub mod validation;

#[cfg(test)]
mod mock_transport;

pub use client::CatalogClient;
pub use download::asset_path;
pub use error::{CatalogError, CatalogResult};
pub use models::{
    BgmTrack, CatalogKind, CatalogRecord, IntoWeather, Named, Scheduled, Song, Weather,
};
pub use query::Catalog;
pub use transport::{ApiRequest, HttpTransport, Transport, TransportResponse};
