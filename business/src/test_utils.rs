//! Test utilities for business layer testing with mock servers.
//!
//! # Example
//!
//! ```ignore
//! let mut test_ctx = TestContext::new().await;
//! test_ctx.mock_generate_direct("https://x/y.png").await;
//!
//! set_input_value(&mut test_ctx.ctx, "hello");
//! request_generation(&mut test_ctx.ctx);
//! test_ctx.flush_and_wait().await;
//!
//! let qr = test_ctx.ctx.compute::<QrCodeCompute>();
//! ```

#![cfg(all(test, not(target_arch = "wasm32")))]

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use image::{ImageBuffer, ImageFormat, Rgba};
use quickqr_clipboard::MockClipboard;
use quickqr_states::StateCtx;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use crate::{ClipboardState, GeneratorConfig, register};

pub const GENERATE_PATH: &str = "/prod/generate";
pub const IMAGE_PATH: &str = "/qr/y.png";

/// Test context that holds a mock server and a configured StateCtx.
pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
    pub clipboard: Arc<MockClipboard>,
    pub download_dir: PathBuf,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_clipboard(MockClipboard::new()).await
    }

    pub async fn with_clipboard(clipboard: MockClipboard) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock_server = MockServer::start().await;
        let download_dir = unique_download_dir();
        let config = GeneratorConfig::new(format!("{}{GENERATE_PATH}", mock_server.uri()))
            .with_download_dir(&download_dir);

        let clipboard = Arc::new(clipboard);
        let mut ctx = StateCtx::new();
        register(
            &mut ctx,
            config,
            ClipboardState::from_arc(clipboard.clone()),
        );

        Self {
            mock_server,
            ctx,
            clipboard,
            download_dir,
        }
    }

    /// URL the mock server serves [`sample_png`] from.
    pub fn image_url(&self) -> String {
        format!("{}{IMAGE_PATH}", self.mock_server.uri())
    }

    /// Flush all pending commands and wait for async tasks to complete.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let timeout = Duration::from_secs(5);
        let start = std::time::Instant::now();

        while self.ctx.task_count() > 0 {
            assert!(
                start.elapsed() <= timeout,
                "Timed out waiting for pending tasks ({} still in JoinSet)",
                self.ctx.task_count()
            );

            if self.ctx.task_set_mut().join_next().await.is_some() {
                self.ctx.sync_computes();
            }
        }

        self.ctx.sync_computes();
    }

    pub async fn shutdown(&mut self) {
        self.ctx.shutdown().await;
        let _ = std::fs::remove_dir_all(&self.download_dir);
    }

    // =========================================================================
    // Mock endpoint helpers
    // =========================================================================

    pub async fn mock_generate(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(response)
            .mount(&self.mock_server)
            .await;
    }

    /// `{"qr_code_url": url}`
    pub async fn mock_generate_direct(&self, url: &str) {
        self.mock_generate(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "qr_code_url": url })),
        )
        .await;
    }

    /// Same as [`Self::mock_generate_direct`], answered after `delay`.
    pub async fn mock_generate_delayed(&self, url: &str, delay: Duration) {
        self.mock_generate(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "qr_code_url": url }))
                .set_delay(delay),
        )
        .await;
    }

    pub async fn mock_image(&self) {
        Mock::given(method("GET"))
            .and(path(IMAGE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .set_body_bytes(sample_png()),
            )
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_image_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(IMAGE_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.mock_server)
            .await;
    }
}

/// A 4x4 black PNG.
pub fn sample_png() -> Vec<u8> {
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageFormat::Png)
        .expect("encode png");
    cursor.into_inner()
}

fn unique_download_dir() -> PathBuf {
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("quickqr-test-{}-{n}", std::process::id()))
}
