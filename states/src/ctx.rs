use std::any::{Any, TypeId};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use flume::{Receiver, Sender};
use log::{debug, info, warn};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::updater::{UpdateKind, UpdateMessage};
use crate::{
    Command, CommandSnapshot, Compute, State, StateError, TaskHandle, TaskId, Updater,
};

/// Owner of all states, computes and commands of one application instance.
///
/// The UI thread is the only writer: it edits states directly, dispatches
/// commands, and calls [`StateCtx::sync_computes`] once per frame to apply what
/// running commands sent back.
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, Box<dyn Compute>>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,

    queue: VecDeque<(TypeId, &'static str)>,
    running: BTreeMap<TypeId, TaskHandle>,
    generation: u64,
    tasks: JoinSet<()>,

    send: Sender<UpdateMessage>,
    recv: Receiver<UpdateMessage>,
}

impl fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("queued", &self.queue.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            queue: VecDeque::new(),
            running: BTreeMap::new(),
            generation: 0,
            tasks: JoinSet::new(),
            send,
            recv,
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        self.computes.insert(TypeId::of::<T>(), Box::new(compute));
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Box::new(command));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, StateError> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(StateError::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was never added with [`StateCtx::add_state`].
    pub fn state<T: State>(&self) -> &T {
        match self.try_state::<T>() {
            Ok(state) => state,
            Err(e) => panic!("StateCtx: {e}"),
        }
    }

    /// # Panics
    /// Panics if `T` was never added with [`StateCtx::add_state`].
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        match self
            .states
            .get_mut(&TypeId::of::<T>())
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
        {
            Some(state) => state,
            None => panic!("StateCtx: {}", StateError::state_not_found::<T>()),
        }
    }

    /// Edit a state in place. Unregistered states are skipped with a warning.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        match self
            .states
            .get_mut(&TypeId::of::<T>())
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
        {
            Some(state) => f(state),
            None => warn!("StateCtx::update: {}", StateError::state_not_found::<T>()),
        }
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never recorded with [`StateCtx::record_compute`].
    pub fn compute<T: Compute>(&self) -> &T {
        match self.cached::<T>() {
            Some(compute) => compute,
            None => panic!("StateCtx: {}", StateError::compute_not_found::<T>()),
        }
    }

    /// An updater that is not tied to any task; its updates are always applied.
    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    pub fn enqueue_command<C: Command>(&mut self) {
        self.queue
            .push_back((TypeId::of::<C>(), std::any::type_name::<C>()));
    }

    /// Run every queued command, then apply what their synchronous part sent.
    pub fn flush_commands(&mut self) {
        while let Some((type_id, type_name)) = self.queue.pop_front() {
            self.start(type_id, type_name);
        }
        self.sync_computes();
    }

    /// Enqueue and immediately flush `C`.
    pub fn dispatch<C: Command>(&mut self) {
        self.enqueue_command::<C>();
        self.flush_commands();
    }

    /// Cancel the in-flight run of `C`, if any. Its pending updates are discarded.
    pub fn cancel<C: Command>(&mut self) {
        if let Some(handle) = self.running.remove(&TypeId::of::<C>()) {
            debug!(
                "Cancelling {} (generation {})",
                std::any::type_name::<C>(),
                handle.id().generation()
            );
            handle.cancel();
        }
    }

    fn start(&mut self, type_id: TypeId, type_name: &'static str) {
        if !self.commands.contains_key(&type_id) {
            warn!(
                "StateCtx::dispatch: {}",
                StateError::CommandNotFound { type_name }
            );
            return;
        }

        if let Some(previous) = self.running.remove(&type_id) {
            debug!(
                "Replacing {type_name} generation {} with a new run",
                previous.id().generation()
            );
            previous.cancel();
        }

        self.generation += 1;
        let handle = TaskHandle::new(
            TaskId::new(type_id, self.generation),
            CancellationToken::new(),
        );
        let snapshot = self.snapshot();
        let updater = self.updater().scoped(handle.cancellation_token());

        let Some(command) = self.commands.get(&type_id) else {
            return;
        };
        let future = command.run(snapshot, updater, handle.cancellation_token());
        self.tasks.spawn(future);
        self.running.insert(type_id, handle);
    }

    fn snapshot(&self) -> CommandSnapshot {
        let states = self
            .states
            .iter()
            .filter_map(|(id, state)| state.snapshot().map(|snap| (*id, snap)));
        let computes = self
            .computes
            .iter()
            .filter_map(|(id, compute)| compute.snapshot().map(|snap| (*id, snap)));
        CommandSnapshot::new(states.chain(computes).collect())
    }

    /// Apply every update sent since the last sync and reap finished tasks.
    pub fn sync_computes(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(e) = joined
                && e.is_panic()
            {
                warn!("Command task panicked: {e}");
            }
        }

        while let Ok(message) = self.recv.try_recv() {
            self.apply(message);
        }
    }

    fn apply(&mut self, message: UpdateMessage) {
        if message.is_stale() {
            debug!(
                "Discarding update for {} from a cancelled task",
                message.type_name
            );
            return;
        }

        let Some(compute) = self.computes.get_mut(&message.target) else {
            warn!(
                "sync_computes: {}",
                StateError::ComputeNotFound {
                    type_name: message.type_name
                }
            );
            return;
        };

        match message.kind {
            UpdateKind::Set(value) => compute.assign_box(value),
            UpdateKind::Modify(f) => {
                let target: &mut dyn Any = compute.as_any_mut();
                f(target);
            }
        }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_set_mut(&mut self) -> &mut JoinSet<()> {
        &mut self.tasks
    }

    /// Cancel every running command and wait for the tasks to wind down.
    pub async fn shutdown(&mut self) {
        info!("StateCtx: shutting down {} task(s)", self.tasks.len());
        for (_, handle) in std::mem::take(&mut self.running) {
            handle.cancel();
        }
        self.tasks.shutdown().await;
    }
}
