use std::any::Any;
use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, Updater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A manual-only side effect, dispatched explicitly via `StateCtx::dispatch`.
///
/// `run` is called on the UI thread; whatever it does before returning the future
/// (for example `updater.set(..)` of a pending status) is applied by the same
/// `dispatch` call. The returned future is spawned on the Tokio runtime.
///
/// Dispatching a command while an earlier run of the same command is still in
/// flight cancels the earlier run. Long-running commands should race their IO
/// against `cancel.cancelled()`.
pub trait Command: Any + Send {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture;
}
