use std::sync::Arc;
use std::time::Duration;

use egui_kittest::Harness;
use quickqr_business::GeneratorConfig;
use quickqr_clipboard::MockClipboard;
use quickqr_ui::QuickQrApp;
use quickqr_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GENERATE_PATH: &str = "/prod/generate";
pub const IMAGE_PATH: &str = "/qr/code.png";

/// Default time to let a mocked request settle between frames.
pub const DEFAULT_NETWORK_WAIT_MS: u64 = 20;

pub struct TestCtx<'a> {
    mock_server: MockServer,
    clipboard: Arc<MockClipboard>,
    harness: Harness<'a, QuickQrApp>,
}

impl<'a> TestCtx<'a> {
    pub async fn new_app() -> Self {
        Self::with_clipboard(MockClipboard::new()).await
    }

    pub async fn with_clipboard(clipboard: MockClipboard) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock_server = MockServer::start().await;
        let clipboard = Arc::new(clipboard);
        let config = GeneratorConfig::new(format!("{}{GENERATE_PATH}", mock_server.uri()))
            .with_download_dir(std::env::temp_dir().join("quickqr-ui-tests"));
        let state = State::with_clipboard(config, clipboard.clone());

        let app = QuickQrApp::builder().state(state).build();
        let harness = Harness::builder()
            .with_size(egui::vec2(800.0, 1200.0))
            .build_eframe(|_| app);

        Self {
            mock_server,
            clipboard,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, QuickQrApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, QuickQrApp> {
        &self.harness
    }

    #[allow(unused)]
    pub fn clipboard(&self) -> &MockClipboard {
        &self.clipboard
    }

    #[allow(unused)]
    pub fn image_url(&self) -> String {
        format!("{}{IMAGE_PATH}", self.mock_server.uri())
    }

    pub async fn mock_generate(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(response)
            .mount(&self.mock_server)
            .await;
    }

    #[allow(unused)]
    pub async fn mock_image(&self, body: Vec<u8>) {
        Mock::given(method("GET"))
            .and(path(IMAGE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .set_body_bytes(body),
            )
            .mount(&self.mock_server)
            .await;
    }

    /// Step frames until `done` holds, letting background tasks run in between.
    pub async fn step_until(&mut self, mut done: impl FnMut(&QuickQrApp) -> bool) -> bool {
        for _ in 0..100 {
            self.harness.step();
            if done(self.harness.state()) {
                return true;
            }
            yield_wait_for_network(DEFAULT_NETWORK_WAIT_MS).await;
        }
        false
    }
}

pub async fn yield_wait_for_network(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
