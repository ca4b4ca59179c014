/// HTTP client for the hazard service.
pub mod api_client;
/// Data layer coloring and boundary labelling.
pub mod layer;
/// Legend drawing.
pub mod legend_svg;
/// Postcode search.
pub mod postcode;
/// Effect execution for a client session.
pub mod session;
#[cfg(test)]
pub(crate) mod test_server;
