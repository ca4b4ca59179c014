//! HTTP access to the hazard service.

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::{
    dto::{geojson::FeatureCollection, metadata::Metadata},
    state::{BoundaryLayer, Endpoints},
};

/// Convenient result alias returning [`ApiError`] failures.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures talking to the hazard service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build HTTP client")]
    ClientBuilder {
        /// Builder failure.
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent.
    #[error("failed to send request to `{path}`")]
    RequestSend {
        /// Request path.
        path: String,
        /// Transport failure.
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with a non-success status.
    #[error("unexpected response status {status} for `{path}`")]
    RequestStatus {
        /// Request path.
        path: String,
        /// Status returned by the service.
        status: StatusCode,
    },
    /// The body was not the expected JSON.
    #[error("failed to decode response for `{path}`")]
    DecodeResponse {
        /// Request path.
        path: String,
        /// Decoding failure.
        #[source]
        source: reqwest::Error,
    },
}

/// Abstraction over the hazard service, so the session can run against a
/// fake in tests.
pub trait HazardApi: Send + Sync {
    /// `GET /data/metadata`.
    fn fetch_metadata(&self) -> BoxFuture<'static, ApiResult<Metadata>>;
    /// GeoJSON data layer at `url`, as built by the reducer.
    fn fetch_layer(&self, url: Url) -> BoxFuture<'static, ApiResult<FeatureCollection>>;
    /// `GET /boundaries/<layer>`.
    fn fetch_boundary(
        &self,
        layer: BoundaryLayer,
        url: Url,
    ) -> BoxFuture<'static, ApiResult<FeatureCollection>>;
}

/// [`HazardApi`] backed by `reqwest`.
#[derive(Clone)]
pub struct HttpHazardApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpHazardApi {
    /// Build a client for the service described by `endpoints`.
    pub fn new(endpoints: Endpoints, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::ClientBuilder { source })?;
        Ok(Self { client, endpoints })
    }

    /// URL builder of the service.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

async fn get_json<T>(client: Client, url: Url) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    let path = url.path().to_string();
    debug!(%url, "GET");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ApiError::RequestSend {
            path: path.clone(),
            source,
        })?;

    if !response.status().is_success() {
        return Err(ApiError::RequestStatus {
            path,
            status: response.status(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|source| ApiError::DecodeResponse { path, source })
}

impl HazardApi for HttpHazardApi {
    fn fetch_metadata(&self) -> BoxFuture<'static, ApiResult<Metadata>> {
        Box::pin(get_json(self.client.clone(), self.endpoints.metadata()))
    }

    fn fetch_layer(&self, url: Url) -> BoxFuture<'static, ApiResult<FeatureCollection>> {
        Box::pin(get_json(self.client.clone(), url))
    }

    fn fetch_boundary(
        &self,
        layer: BoundaryLayer,
        url: Url,
    ) -> BoxFuture<'static, ApiResult<FeatureCollection>> {
        debug!(%layer, "fetching boundary layer");
        Box::pin(get_json(self.client.clone(), url))
    }
}
