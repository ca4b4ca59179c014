use tracing::{debug, warn};

use crate::state::{
    reducer::{Effect, ReduceError, ReducerContext, reduce},
    selection::{UiEvent, UiState},
};

/// Owns the UI state and versions every committed change.
///
/// The version doubles as the ticket of the data requests issued by that
/// change, so a response can be checked against the latest request before it
/// is drawn.
#[derive(Debug, Clone, Default)]
pub struct UiStore {
    state: UiState,
    version: u64,
    latest_ticket: Option<u64>,
}

impl UiStore {
    /// Store holding the default (uninitialised) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Number of committed changes.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Ticket of the most recent data request, if any was issued.
    pub fn latest_ticket(&self) -> Option<u64> {
        self.latest_ticket
    }

    /// Whether a response for `ticket` still matches the latest request.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest_ticket == Some(ticket)
    }

    /// Run the reducer and commit its state. On error the store is untouched.
    pub fn dispatch(
        &mut self,
        event: UiEvent,
        ctx: &ReducerContext<'_>,
    ) -> Result<Vec<Effect>, ReduceError> {
        let reduction = reduce(&self.state, event.clone(), ctx).inspect_err(|err| {
            warn!(?event, error = %err, "event rejected");
        })?;

        if reduction.effects.is_empty() && reduction.state == self.state {
            debug!(?event, "event changed nothing");
            return Ok(Vec::new());
        }

        let version = self.version + 1;
        let mut effects = reduction.effects;
        for effect in &mut effects {
            if let Effect::FetchData(fetch) = effect {
                fetch.ticket = version;
                self.latest_ticket = Some(version);
            }
        }

        self.state = reduction.state;
        self.version = version;
        debug!(version, effects = effects.len(), "ui state committed");
        Ok(effects)
    }
}
