use std::sync::Arc;

use quickqr_business::{ClipboardState, GeneratorConfig, register};
use quickqr_clipboard::{ClipboardProvider, MockClipboard, SystemClipboard};
use quickqr_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl State {
    /// Production state writing to the system clipboard.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_clipboard(config, Arc::new(SystemClipboard))
    }

    pub fn with_clipboard(config: GeneratorConfig, clipboard: Arc<dyn ClipboardProvider>) -> Self {
        let mut ctx = StateCtx::new();
        register(&mut ctx, config, ClipboardState::from_arc(clipboard));
        Self { ctx }
    }

    /// State pointed at a mock endpoint, with an in-memory clipboard.
    pub fn test(endpoint_url: String) -> Self {
        Self::with_clipboard(
            GeneratorConfig::new(endpoint_url).with_download_dir(std::env::temp_dir()),
            Arc::new(MockClipboard::new()),
        )
    }
}
