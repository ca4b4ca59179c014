use serde::Deserialize;

use crate::state::selection::GridReference;

/// Body of `GET /postcodes/<postcode>` on postcodes.io.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PostcodeResponse {
    /// HTTP status echoed in the body.
    pub status: u16,
    /// Lookup result; absent on errors.
    #[serde(default)]
    pub result: Option<PostcodeResult>,
}

/// Subset of a postcodes.io result used to center the map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PostcodeResult {
    /// Normalised postcode, e.g. `EH8 9YL`.
    #[serde(default)]
    pub postcode: String,
    /// British National Grid easting; null for some Crown dependency codes.
    #[serde(default)]
    pub eastings: Option<f64>,
    /// British National Grid northing.
    #[serde(default)]
    pub northings: Option<f64>,
}

impl PostcodeResponse {
    /// Grid reference of a successful lookup.
    pub fn grid_reference(&self) -> Option<GridReference> {
        if self.status != 200 {
            return None;
        }
        let result = self.result.as_ref()?;
        Some(GridReference {
            easting: result.eastings?,
            northing: result.northings?,
        })
    }
}
