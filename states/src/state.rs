use std::any::Any;

/// Plain data registered in a [`StateCtx`](crate::StateCtx).
///
/// States are written by the UI (`StateCtx::update`) and read by commands through a
/// [`CommandSnapshot`](crate::CommandSnapshot), so every state that a command needs
/// must return a clone from [`State::snapshot`].
pub trait State: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Owned copy handed to commands. `None` keeps the state out of snapshots.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// Replace `target` with `new_self` when the boxed value has the same type.
///
/// Mismatched types are ignored with a warning; they can only come from a
/// programming error in an `Updater::set` call site.
pub fn assign_impl<T: Any>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => log::warn!(
            "assign_impl: type mismatch while assigning {}",
            std::any::type_name::<T>()
        ),
    }
}
