use thiserror::Error;

use crate::{
    color_map::ColorMapError,
    config::ConfigError,
    dto::metadata::MetadataError,
    services::{api_client::ApiError, postcode::PostcodeError},
    state::{ReduceError, endpoints::EndpointError},
};

/// Errors surfaced by a map session.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Service base URL is unusable.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    /// The hazard service failed or answered garbage.
    #[error("hazard service: {0}")]
    Api(#[from] ApiError),
    /// The metadata document is inconsistent.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    /// A UI event was refused.
    #[error("rejected input: {0}")]
    Reduce(#[from] ReduceError),
    /// A layer could not be colored.
    #[error("cannot color layer: {0}")]
    ColorMap(#[from] ColorMapError),
    /// Postcode search failed; the message is meant for the user.
    #[error(transparent)]
    Postcode(#[from] PostcodeError),
    /// Writing a drawn layer failed.
    #[error("failed to write `{path}`")]
    Output {
        /// Destination file.
        path: String,
        #[source]
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Encoding a drawn layer failed.
    #[error("failed to encode `{path}`")]
    Encode {
        /// Destination file.
        path: String,
        #[source]
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Convenient result alias returning [`ClientError`] failures.
pub type ClientResult<T> = Result<T, ClientError>;
