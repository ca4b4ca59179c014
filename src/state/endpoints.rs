use reqwest::Url;
use thiserror::Error;

use crate::state::{
    boundary::BoundaryLayer,
    selection::{DataFormat, format_arg_value},
};

/// The base URL of the hazard service could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// The string is not a URL.
    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl {
        /// Rejected input.
        url: String,
        /// Parser message.
        reason: String,
    },
    /// The URL has no hierarchical path (e.g. `mailto:`).
    #[error("base URL `{0}` cannot carry a path")]
    CannotBeABase(String),
}

/// Builds the URLs of the hazard service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Parse and check the service base URL, e.g. `http://localhost:5000/scotclimpact`.
    pub fn new(base: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(base).map_err(|err| EndpointError::InvalidBaseUrl {
            url: base.to_string(),
            reason: err.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(EndpointError::CannotBeABase(base.to_string()));
        }
        Ok(Self { base: url })
    }

    /// Base URL of the service.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `<base>/data/metadata`
    pub fn metadata(&self) -> Url {
        self.with_segments(&["data", "metadata"])
    }

    /// `<base>/data/map/<hazard>[/<format>]?<name>=<value>&…`
    ///
    /// GeoJSON is the service default, so it adds no format segment.
    pub fn data(&self, hazard: &str, format: DataFormat, args: &[(String, f64)]) -> Url {
        let mut url = match format {
            DataFormat::GeoJson => self.with_segments(&["data", "map", hazard]),
            other => self.with_segments(&["data", "map", hazard, other.as_str()]),
        };
        if !args.is_empty() {
            let mut query = url.query_pairs_mut();
            for (name, value) in args {
                query.append_pair(name, &format_arg_value(*value));
            }
        }
        url
    }

    /// `<base>/boundaries/<layer>`
    pub fn boundary(&self, layer: BoundaryLayer) -> Url {
        self.with_segments(&["boundaries", layer.as_str()])
    }

    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        // `new` rejects cannot-be-a-base URLs, so the path is always editable.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new("http://localhost:5000/scotclimpact/").unwrap()
    }

    #[test]
    fn metadata_url() {
        assert_eq!(
            endpoints().metadata().as_str(),
            "http://localhost:5000/scotclimpact/data/metadata"
        );
    }

    #[test]
    fn data_url_encodes_arguments_in_order() {
        let args = vec![("covariate".to_string(), 1.5), ("return_time".to_string(), 100.0)];
        let url = endpoints().data("extreme_temp_intensity", DataFormat::GeoJson, &args);
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/scotclimpact/data/map/extreme_temp_intensity?covariate=1.5&return_time=100"
        );
    }

    #[test]
    fn download_urls_carry_the_format() {
        let args = vec![("intensity".to_string(), 30.0)];
        let url = endpoints().data("extreme_temp_return_time", DataFormat::NetCdf, &args);
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/scotclimpact/data/map/extreme_temp_return_time/netcdf?intensity=30"
        );
    }

    #[test]
    fn base_without_trailing_slash() {
        let endpoints = Endpoints::new("https://example.org").unwrap();
        assert_eq!(
            endpoints.boundary(BoundaryLayer::HealthBoards).as_str(),
            "https://example.org/boundaries/health_boards"
        );
    }

    #[test]
    fn rejects_unusable_base() {
        assert!(matches!(
            Endpoints::new("not a url"),
            Err(EndpointError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            Endpoints::new("mailto:someone@example.org"),
            Err(EndpointError::CannotBeABase(_))
        ));
    }
}
