use std::any::Any;

use crate::State;

/// A cache that only commands write to, through an [`Updater`](crate::Updater).
///
/// Computes never perform side effects themselves. A command does the IO and
/// sends the new value back; `StateCtx::sync_computes` applies it on the UI thread.
pub trait Compute: State {
    /// Replace `self` with a boxed value of the same type.
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}
