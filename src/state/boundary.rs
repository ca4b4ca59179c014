use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Administrative boundaries that can be drawn over the hazard layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryLayer {
    /// Council areas.
    LocalAuthorities,
    /// Scottish Fire and Rescue local senior officer areas.
    FireRescue,
    /// NHS health boards.
    HealthBoards,
    /// Health and social care integration authorities.
    HealthIntegrationAuthorities,
}

/// Name that does not match any [`BoundaryLayer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown boundary layer `{0}`")]
pub struct UnknownBoundaryLayer(pub String);

impl BoundaryLayer {
    /// All layers, in menu order.
    pub const ALL: [BoundaryLayer; 4] = [
        BoundaryLayer::LocalAuthorities,
        BoundaryLayer::FireRescue,
        BoundaryLayer::HealthBoards,
        BoundaryLayer::HealthIntegrationAuthorities,
    ];

    /// Name used in the `/boundaries/<name>` path.
    pub fn as_str(self) -> &'static str {
        match self {
            BoundaryLayer::LocalAuthorities => "local_authorities",
            BoundaryLayer::FireRescue => "fire_rescue",
            BoundaryLayer::HealthBoards => "health_boards",
            BoundaryLayer::HealthIntegrationAuthorities => "health_integration_authorities",
        }
    }

    /// Feature property holding the area name.
    pub fn label_property(self) -> &'static str {
        match self {
            BoundaryLayer::LocalAuthorities => "local_authority",
            BoundaryLayer::FireRescue => "sfrlsoname",
            BoundaryLayer::HealthBoards => "HBName",
            BoundaryLayer::HealthIntegrationAuthorities => "HIAName",
        }
    }

    /// Map label for a feature: the area name broken over several lines so it
    /// fits inside small polygons.
    pub fn feature_label(self, properties: &Map<String, Value>) -> Option<String> {
        let name = properties.get(self.label_property())?.as_str()?;
        let label = match self {
            BoundaryLayer::FireRescue => name.replace(',', ",\n").replace(" and ", " and\n"),
            BoundaryLayer::LocalAuthorities
            | BoundaryLayer::HealthBoards
            | BoundaryLayer::HealthIntegrationAuthorities => name.replace(' ', "\n"),
        };
        Some(label)
    }

    /// Parse a dropdown value; `"none"` (or an empty string) means no overlay.
    pub fn parse_optional(value: &str) -> Result<Option<Self>, UnknownBoundaryLayer> {
        match value {
            "" | "none" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl fmt::Display for BoundaryLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryLayer {
    type Err = UnknownBoundaryLayer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoundaryLayer::ALL
            .into_iter()
            .find(|layer| layer.as_str() == s)
            .ok_or_else(|| UnknownBoundaryLayer(s.to_string()))
    }
}
