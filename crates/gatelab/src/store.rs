//! The state store interface and its in-memory implementation.

use crate::circuits::CircuitKind;
use crate::error::Result;
use crate::state::{CircuitState, UserPreferences};

/// Key-value persistence for circuit states and user preferences.
pub trait StateStore {
    /// Insert or replace a state by id.
    ///
    /// Returns `false` without writing when the latest state of the same
    /// circuit type already has the same fingerprint.
    ///
    /// # Errors
    ///
    /// Returns an error if the state fails validation or the write fails.
    fn save_state(&mut self, state: &CircuitState) -> Result<bool>;

    /// Look up a state by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store can't be read.
    fn get_state(&self, id: &str) -> Result<Option<CircuitState>>;

    /// Every state, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store can't be read.
    fn all_states(&self) -> Result<Vec<CircuitState>>;

    /// The state of `kind` with the greatest timestamp. On ties the
    /// earliest inserted wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store can't be read.
    fn latest_state(&self, kind: CircuitKind) -> Result<Option<CircuitState>>;

    /// Replace the preferences record.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_preferences(&mut self, prefs: &UserPreferences) -> Result<()>;

    /// The preferences record, if one was ever saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store can't be read.
    fn preferences(&self) -> Result<Option<UserPreferences>>;
}

/// Whether saving `state` would repeat `latest`.
pub(crate) fn repeats_latest(latest: Option<&CircuitState>, state: &CircuitState) -> bool {
    latest.is_some_and(|l| l.fingerprint() == state.fingerprint())
}

/// Pick the latest state: greatest timestamp, first seen on ties.
fn pick_latest<'a>(states: impl Iterator<Item = &'a CircuitState>) -> Option<&'a CircuitState> {
    states.fold(None::<&'a CircuitState>, |best, s| match best {
        Some(b) if b.timestamp >= s.timestamp => Some(b),
        _ => Some(s),
    })
}

/// A [`StateStore`] that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    states: Vec<CircuitState>,
    preferences: Option<UserPreferences>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no states are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn save_state(&mut self, state: &CircuitState) -> Result<bool> {
        state.validate()?;
        let latest = pick_latest(
            self.states
                .iter()
                .filter(|s| s.circuit_type == state.circuit_type),
        );
        if repeats_latest(latest, state) {
            tracing::trace!(id = %state.id, "Skipping unchanged state");
            return Ok(false);
        }
        match self.states.iter_mut().find(|s| s.id == state.id) {
            Some(existing) => *existing = state.clone(),
            None => self.states.push(state.clone()),
        }
        Ok(true)
    }

    fn get_state(&self, id: &str) -> Result<Option<CircuitState>> {
        Ok(self.states.iter().find(|s| s.id == id).cloned())
    }

    fn all_states(&self) -> Result<Vec<CircuitState>> {
        Ok(self.states.clone())
    }

    fn latest_state(&self, kind: CircuitKind) -> Result<Option<CircuitState>> {
        Ok(pick_latest(self.states.iter().filter(|s| s.circuit_type == kind)).cloned())
    }

    fn save_preferences(&mut self, prefs: &UserPreferences) -> Result<()> {
        self.preferences = Some(prefs.clone());
        Ok(())
    }

    fn preferences(&self) -> Result<Option<UserPreferences>> {
        Ok(self.preferences.clone())
    }
}
