//! The page's input state and the only mutators allowed to touch it.
//!
//! Every mutator re-runs [`GenerateQrCommand`] when the `(should_generate, value)`
//! pair actually changed, so a flag that merely stays `true` across frames never
//! triggers another request.

use std::any::Any;

use log::debug;
use quickqr_states::{State, StateCtx};

use crate::generation::GenerateQrCommand;

/// Authoritative input value and generation trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrPageInput {
    pub value: String,
    pub should_generate: bool,
}

impl QrPageInput {
    pub fn is_submittable(&self) -> bool {
        is_submittable(&self.value)
    }
}

/// Whether `value` may be sent for generation: non-empty after trimming.
pub fn is_submittable(value: &str) -> bool {
    !value.trim().is_empty()
}

impl State for QrPageInput {
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

/// Store a new input value.
pub fn set_input_value(ctx: &mut StateCtx, value: impl Into<String>) {
    let value = value.into();
    if ctx.state::<QrPageInput>().value == value {
        return;
    }
    ctx.update::<QrPageInput>(|page| page.value = value);
    ctx.dispatch::<GenerateQrCommand>();
}

/// Flip the trigger on. Ignored for blank input.
///
/// Returns whether generation was requested.
pub fn request_generation(ctx: &mut StateCtx) -> bool {
    let page = ctx.state::<QrPageInput>();
    if !page.is_submittable() {
        debug!("Ignoring generation request for blank input");
        return false;
    }
    if !page.should_generate {
        ctx.update::<QrPageInput>(|page| page.should_generate = true);
        ctx.dispatch::<GenerateQrCommand>();
    }
    true
}

/// Reset the page: empty value, trigger off, in-flight work cancelled.
pub fn clear(ctx: &mut StateCtx) {
    let page = ctx.state::<QrPageInput>();
    if page.value.is_empty() && !page.should_generate {
        return;
    }
    ctx.update::<QrPageInput>(|page| *page = QrPageInput::default());
    ctx.dispatch::<GenerateQrCommand>();
}
