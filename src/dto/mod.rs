/// GeoJSON layers served by the hazard service.
pub mod geojson;
/// Legend specifications and drawable legends.
pub mod legend;
/// Scenario and hazard metadata document.
pub mod metadata;
/// postcodes.io responses.
pub mod postcode;
pub mod validation;
