//! Postcode to grid reference lookup through postcodes.io.

use std::time::Duration;

use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    dto::{postcode::PostcodeResponse, validation::validate_postcode},
    state::GridReference,
};

/// Public postcodes.io instance.
pub const DEFAULT_POSTCODE_API: &str = "https://api.postcodes.io";

/// Why a postcode could not be turned into a location.
#[derive(Debug, Error)]
pub enum PostcodeError {
    /// Nothing to look up.
    #[error("enter a postcode to search for")]
    Blank,
    /// The lookup service does not know the postcode (or it has no grid
    /// reference).
    #[error("The postcode {0} could not be found.")]
    NotFound(String),
    /// The input cannot be a UK postcode, so no request is made.
    #[error("`{postcode}` is not a valid postcode: {reason}")]
    Malformed {
        /// Trimmed input.
        postcode: String,
        /// Which rule the input breaks.
        reason: String,
    },
    /// The service base URL is unusable.
    #[error("invalid postcode service URL `{0}`")]
    InvalidServiceUrl(String),
    /// Building the HTTP client failed.
    #[error("failed to build HTTP client")]
    ClientBuilder(#[source] reqwest::Error),
    /// The request failed before any answer.
    #[error("postcode lookup for `{postcode}` failed")]
    Request {
        /// Postcode being looked up.
        postcode: String,
        /// Underlying HTTP failure.
        #[source]
        source: reqwest::Error,
    },
}

/// Client for `GET <service>/postcodes/<postcode>`.
#[derive(Clone)]
pub struct PostcodeLookup {
    client: Client,
    base: Url,
}

impl PostcodeLookup {
    /// Client for the service at `base`, e.g. [`DEFAULT_POSTCODE_API`].
    pub fn new(base: &str, timeout: Duration) -> Result<Self, PostcodeError> {
        let base = Url::parse(base)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| PostcodeError::InvalidServiceUrl(base.to_string()))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PostcodeError::ClientBuilder)?;
        Ok(Self { client, base })
    }

    /// Lookup URL for `postcode`.
    pub fn url(&self, postcode: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["postcodes", postcode]);
        }
        url
    }

    /// Resolve `postcode` to British National Grid coordinates.
    pub async fn lookup(&self, postcode: &str) -> Result<GridReference, PostcodeError> {
        let postcode = postcode.trim();
        if postcode.is_empty() {
            return Err(PostcodeError::Blank);
        }
        validate_postcode(postcode).map_err(|err| {
            debug!(postcode, code = %err.code, "malformed postcode");
            PostcodeError::Malformed {
                postcode: postcode.to_string(),
                reason: err
                    .message
                    .map_or_else(|| err.code.to_string(), |message| message.to_string()),
            }
        })?;

        let response = self
            .client
            .get(self.url(postcode))
            .send()
            .await
            .map_err(|source| PostcodeError::Request {
                postcode: postcode.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            info!(postcode, status = %response.status(), "postcode not found");
            return Err(PostcodeError::NotFound(postcode.to_string()));
        }

        let body = response
            .json::<PostcodeResponse>()
            .await
            .map_err(|source| PostcodeError::Request {
                postcode: postcode.to_string(),
                source,
            })?;

        body.grid_reference()
            .ok_or_else(|| PostcodeError::NotFound(postcode.to_string()))
    }
}
