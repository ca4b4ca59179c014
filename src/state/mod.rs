//! UI state of the map client: what the user selected, the pure reducer that
//! turns events into state and effects, and the store that versions changes.

/// Administrative boundary overlays.
pub mod boundary;
/// Calculation description templates.
pub mod description;
/// Hazard service URLs.
pub mod endpoints;
/// Pure event reducer.
pub mod reducer;
/// Selection, events and display helpers.
pub mod selection;
/// Versioned store around the reducer.
pub mod store;

pub use self::boundary::BoundaryLayer;
pub use self::endpoints::Endpoints;
pub use self::reducer::{Effect, ReduceError, ReducerContext, Reduction, reduce};
pub use self::selection::{Calculation, GridReference, UiEvent, UiState};
pub use self::store::UiStore;
