//! State runtime for QuickQR.
//!
//! - [`State`]: plain data edited by the UI.
//! - [`Compute`]: caches that commands write to through an [`Updater`].
//! - [`Command`]: explicit side effects returning a `Send` future.
//! - [`StateCtx`]: owns all of the above, spawns commands on Tokio and applies their
//!   updates in [`StateCtx::sync_computes`].
//!
//! Commands of the same type never overlap: re-dispatching cancels the previous run
//! and anything it sends afterwards is dropped.

mod command;
mod compute;
mod ctx;
mod error;
mod snapshot;
mod state;
mod task;
mod updater;

pub use command::{Command, CommandFuture};
pub use compute::Compute;
pub use ctx::StateCtx;
pub use error::StateError;
pub use snapshot::CommandSnapshot;
pub use state::{State, assign_impl};
pub use task::{TaskHandle, TaskId};
pub use updater::Updater;

#[cfg(test)]
mod state_ctx_tests {
    use std::any::Any;
    use std::time::Duration;

    use tokio_util::sync::CancellationToken;

    use super::*;

    #[derive(Debug, Default, Clone)]
    struct Counter {
        value: i32,
    }

    impl State for Counter {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
            Some(Box::new(self.clone()))
        }
    }

    #[derive(Debug, Default, Clone)]
    struct Echo {
        seen: Vec<i32>,
    }

    impl State for Echo {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    impl Compute for Echo {
        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            assign_impl(self, new_self);
        }
    }

    /// Records the counter immediately, then again after a delay.
    struct EchoCommand;

    impl Command for EchoCommand {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: Updater,
            cancel: CancellationToken,
        ) -> CommandFuture {
            let value = snap.state::<Counter>().value;
            updater.update::<Echo>(move |echo| echo.seen.push(value));

            Box::pin(async move {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = tokio::time::sleep(Duration::from_millis(50)) => {
                        updater.update::<Echo>(move |echo| echo.seen.push(value * 10));
                    }
                }
            })
        }
    }

    fn setup_ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter::default());
        ctx.record_compute(Echo::default());
        ctx.record_command(EchoCommand);
        ctx
    }

    async fn drain(ctx: &mut StateCtx) {
        while ctx.task_set_mut().join_next().await.is_some() {}
        ctx.sync_computes();
    }

    #[test]
    fn update_edits_registered_state() {
        let mut ctx = setup_ctx();

        ctx.update::<Counter>(|c| c.value = 7);

        assert_eq!(ctx.state::<Counter>().value, 7);
    }

    #[test]
    fn missing_state_is_reported() {
        let ctx = StateCtx::new();

        let err = ctx.try_state::<Counter>().expect_err("nothing registered");
        assert!(matches!(err, StateError::StateNotFound { .. }));
    }

    #[test]
    fn updater_set_is_applied_on_sync() {
        let mut ctx = setup_ctx();

        ctx.updater().set(Echo { seen: vec![1, 2] });
        assert!(ctx.compute::<Echo>().seen.is_empty(), "not applied before sync");

        ctx.sync_computes();
        assert_eq!(ctx.compute::<Echo>().seen, vec![1, 2]);
    }

    #[tokio::test]
    async fn dispatch_applies_synchronous_part_immediately() {
        let mut ctx = setup_ctx();
        ctx.update::<Counter>(|c| c.value = 3);

        ctx.dispatch::<EchoCommand>();
        assert_eq!(ctx.compute::<Echo>().seen, vec![3]);

        drain(&mut ctx).await;
        assert_eq!(ctx.compute::<Echo>().seen, vec![3, 30]);
    }

    #[tokio::test]
    async fn redispatch_cancels_previous_run() {
        let mut ctx = setup_ctx();

        ctx.update::<Counter>(|c| c.value = 1);
        ctx.dispatch::<EchoCommand>();
        ctx.update::<Counter>(|c| c.value = 2);
        ctx.dispatch::<EchoCommand>();

        drain(&mut ctx).await;
        assert_eq!(
            ctx.compute::<Echo>().seen,
            vec![1, 2, 20],
            "the first run's delayed update must be dropped"
        );
    }

    #[tokio::test]
    async fn cancel_discards_pending_updates() {
        let mut ctx = setup_ctx();
        ctx.update::<Counter>(|c| c.value = 5);

        ctx.dispatch::<EchoCommand>();
        ctx.cancel::<EchoCommand>();

        drain(&mut ctx).await;
        assert_eq!(ctx.compute::<Echo>().seen, vec![5]);
    }

    #[tokio::test]
    async fn unknown_command_is_ignored() {
        let mut ctx = StateCtx::new();

        ctx.dispatch::<EchoCommand>();

        assert_eq!(ctx.task_count(), 0);
    }
}
