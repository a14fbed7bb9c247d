use std::any::{Any, TypeId};
use std::fmt;

use flume::Sender;
use tokio_util::sync::CancellationToken;

use crate::Compute;

pub(crate) enum UpdateKind {
    Set(Box<dyn Any + Send>),
    Modify(Box<dyn FnOnce(&mut dyn Any) + Send>),
}

pub(crate) struct UpdateMessage {
    pub(crate) target: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) kind: UpdateKind,
    /// Token of the task that produced this update, if any.
    pub(crate) origin: Option<CancellationToken>,
}

impl UpdateMessage {
    /// Updates from a cancelled task must never reach the UI.
    pub(crate) fn is_stale(&self) -> bool {
        self.origin
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

/// Sends compute updates back to the owning [`StateCtx`](crate::StateCtx).
///
/// Updates are queued and applied by `StateCtx::sync_computes`. An updater handed to
/// a command is tied to that command's task: once the task is cancelled, everything
/// it sends is dropped at sync time.
#[derive(Clone)]
pub struct Updater {
    send: Sender<UpdateMessage>,
    origin: Option<CancellationToken>,
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updater")
            .field("scoped", &self.origin.is_some())
            .finish()
    }
}

impl Updater {
    pub(crate) fn new(send: Sender<UpdateMessage>) -> Self {
        Self { send, origin: None }
    }

    pub(crate) fn scoped(&self, origin: CancellationToken) -> Self {
        Self {
            send: self.send.clone(),
            origin: Some(origin),
        }
    }

    /// Replace the compute `T` with `compute`.
    pub fn set<T: Compute>(&self, compute: T) {
        self.push(UpdateMessage {
            target: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            kind: UpdateKind::Set(Box::new(compute)),
            origin: self.origin.clone(),
        });
    }

    /// Mutate the compute `T` in place.
    ///
    /// Prefer this over [`Updater::set`] when several tasks touch the same compute,
    /// e.g. pushing onto a queue.
    pub fn update<T: Compute>(&self, f: impl FnOnce(&mut T) + Send + 'static) {
        let modify = move |any: &mut dyn Any| {
            if let Some(target) = any.downcast_mut::<T>() {
                f(target);
            }
        };
        self.push(UpdateMessage {
            target: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            kind: UpdateKind::Modify(Box::new(modify)),
            origin: self.origin.clone(),
        });
    }

    /// Whether the task owning this updater has been cancelled.
    pub fn is_stale(&self) -> bool {
        self.origin
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    fn push(&self, message: UpdateMessage) {
        let type_name = message.type_name;
        if self.send.send(message).is_err() {
            log::debug!("Updater: context dropped, discarding update for {type_name}");
        }
    }
}
