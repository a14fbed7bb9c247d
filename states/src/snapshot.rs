use std::any::{Any, TypeId};
use std::collections::BTreeMap;

use crate::{Compute, State, StateError};

/// Owned copies of the states and computes a command may read.
///
/// Taken on the UI thread when the command is flushed, so the command's future
/// never borrows from the [`StateCtx`](crate::StateCtx).
pub struct CommandSnapshot {
    entries: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl CommandSnapshot {
    pub(crate) fn new(entries: BTreeMap<TypeId, Box<dyn Any + Send>>) -> Self {
        Self { entries }
    }

    pub fn try_state<T: State>(&self) -> Result<&T, StateError> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or_else(StateError::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was not registered or does not provide a snapshot.
    pub fn state<T: State>(&self) -> &T {
        match self.try_state::<T>() {
            Ok(state) => state,
            Err(e) => panic!("CommandSnapshot: {e}"),
        }
    }

    pub fn try_compute<T: Compute>(&self) -> Result<&T, StateError> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or_else(StateError::compute_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was not recorded or does not provide a snapshot.
    pub fn compute<T: Compute>(&self) -> &T {
        match self.try_compute::<T>() {
            Ok(compute) => compute,
            Err(e) => panic!("CommandSnapshot: {e}"),
        }
    }
}
