//! Catalog query engine
//!
//! Every query fetches the whole collection and filters it client-side; the
//! service only offers bulk listing and single-record lookup by id. Argument
//! validation always happens before the request is made.
//!
//! Result order follows the decoded collection, which is keyed by the wire's
//! own record keys. Callers must not rely on it.

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CatalogRecord, IntoWeather, Named, Scheduled};
use crate::transport::{ApiRequest, Transport};
use crate::validation::{check_status, validate_hour, NAME_LOCALE};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Query handle for one catalog variant
///
/// Borrowed from [`crate::CatalogClient`]; holds no state between calls.
pub struct Catalog<'a, R> {
    pub(crate) transport: &'a dyn Transport,
    pub(crate) api_version: u32,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: CatalogRecord> Catalog<'a, R> {
    pub fn new(transport: &'a dyn Transport, api_version: u32) -> Self {
        Self {
            transport,
            api_version,
            _record: PhantomData,
        }
    }

    pub(crate) fn request(&self, path: &'static str) -> ApiRequest {
        ApiRequest::new(path)
            .path_param("apiVersion", self.api_version)
            .header("Accept", "application/json")
    }

    /// Fetch every record in the catalog
    ///
    /// An empty collection is a successful, empty result. Decoding is all or
    /// nothing: one record the model cannot represent (a missing field, a
    /// weather outside Sunny/Rainy/Snowy) fails the whole fetch with
    /// [`CatalogError::Transport`], and with it every filter built on `list`.
    pub async fn list(&self) -> CatalogResult<Vec<R>> {
        let request = self.request(R::KIND.list_path());
        debug!(catalog = %R::KIND, path = %request.render_path(), "Requesting catalog");

        let response = self.transport.get(&request).await?;
        check_status(response.status)?;

        let records: BTreeMap<String, R> = serde_json::from_slice(&response.body)?;
        let records: Vec<R> = records.into_values().collect();

        info!(catalog = %R::KIND, count = records.len(), "Retrieved catalog");
        Ok(records)
    }

    /// Fetch one record from the single-record endpoint
    ///
    /// An unknown id surfaces as [`CatalogError::Remote`] with the service's status.
    pub async fn by_id(&self, id: u32) -> CatalogResult<R> {
        let request = self.request(R::KIND.record_path()).path_param("id", id);
        debug!(catalog = %R::KIND, id, "Requesting record");

        let response = self.transport.get(&request).await?;
        check_status(response.status)?;

        Ok(serde_json::from_slice(&response.body)?)
    }

    async fn filter<F>(
        &self,
        describe: impl FnOnce() -> String,
        predicate: F,
    ) -> CatalogResult<Vec<R>>
    where
        F: Fn(&R) -> bool,
    {
        let matched: Vec<R> = self
            .list()
            .await?
            .into_iter()
            .filter(|r| predicate(r))
            .collect();
        if matched.is_empty() {
            return Err(CatalogError::NotFound(describe()));
        }
        Ok(matched)
    }
}

impl<'a, R: Scheduled> Catalog<'a, R> {
    /// All records that play at `hour`, regardless of weather
    pub async fn by_hour(&self, hour: i32) -> CatalogResult<Vec<R>> {
        let hour = validate_hour(hour)?;
        self.filter(|| format!("no {} for hour {}", R::KIND, hour), |r| r.hour() == hour)
            .await
    }

    /// All records that play under `weather`, regardless of hour
    pub async fn by_weather(&self, weather: impl IntoWeather) -> CatalogResult<Vec<R>> {
        let weather = weather.into_weather()?;
        self.filter(
            || format!("no {} for weather {}", R::KIND, weather),
            |r| r.weather() == weather,
        )
        .await
    }

    /// The record for an hour and weather pair
    ///
    /// The pair is expected to be unique but that is not enforced; when the
    /// catalog holds several matches the first one in result order wins.
    pub async fn by_hour_and_weather(
        &self,
        hour: i32,
        weather: impl IntoWeather,
    ) -> CatalogResult<R> {
        let hour = validate_hour(hour)?;
        let weather = weather.into_weather()?;

        let mut matched = self
            .filter(
                || format!("no {} for hour {} and weather {}", R::KIND, hour, weather),
                |r| r.hour() == hour && r.weather() == weather,
            )
            .await?;

        if matched.len() > 1 {
            warn!(
                catalog = %R::KIND,
                hour,
                weather = %weather,
                matches = matched.len(),
                ids = ?matched.iter().map(|r| r.id()).collect::<Vec<_>>(),
                "Multiple records share an hour and weather pair, returning the first"
            );
        }

        Ok(matched.swap_remove(0))
    }
}

impl<'a, R: Named> Catalog<'a, R> {
    /// The first record whose display name equals `name`, ignoring case
    ///
    /// Only the `EUen` name is consulted.
    pub async fn by_name(&self, name: &str) -> CatalogResult<R> {
        let wanted = name.to_lowercase();
        let records = self.list().await?;

        records
            .into_iter()
            .find(|r| {
                r.display_name(NAME_LOCALE)
                    .is_some_and(|n| n.to_lowercase() == wanted)
            })
            .ok_or_else(|| CatalogError::NotFound(format!("no {} named {:?}", R::KIND, name)))
    }
}
