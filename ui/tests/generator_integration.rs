//! Drives the real app against a mock generator endpoint.

use std::io::Cursor;
use std::time::Duration;

use image::{ImageBuffer, ImageFormat, Rgba};
use kittest::Queryable;
use quickqr_business::{
    COPIED_IMAGE_TITLE, GENERATE_ERROR_TITLE, GenerationStatus, QrCodeCompute, QrPageInput,
    SERVER_ERROR_MESSAGE, ToastQueue, set_input_value,
};
use quickqr_clipboard::ClipboardWrite;
use quickqr_ui::widgets::{
    CLEAR_INPUT_LABEL, CLEAR_QR_LABEL, COPY_LABEL, DISPLAY_HEADING, DOWNLOAD_LABEL,
    GENERATE_LABEL, LOADING_TEXT,
};
use serde_json::json;
use wiremock::ResponseTemplate;

use crate::common::TestCtx;

mod common;

fn type_value(ctx: &mut TestCtx<'_>, value: &str) {
    let harness = ctx.harness_mut();
    set_input_value(&mut harness.state_mut().state_mut().ctx, value);
    harness.step();
}

fn is_settled(app: &quickqr_ui::QuickQrApp) -> bool {
    app.state()
        .ctx
        .cached::<QrCodeCompute>()
        .is_some_and(|qr| !qr.is_loading)
        && app.state().ctx.task_count() == 0
}

fn sample_png() -> Vec<u8> {
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageFormat::Png)
        .expect("encode png");
    cursor.into_inner()
}

#[tokio::test]
async fn test_generate_button_shows_spinner_then_actions() {
    let mut ctx = TestCtx::new_app().await;
    ctx.mock_generate(
        ResponseTemplate::new(200)
            .set_body_json(json!({ "qr_code_url": "https://x/y.png" }))
            .set_delay(Duration::from_millis(150)),
    )
    .await;

    type_value(&mut ctx, "hello");
    let harness = ctx.harness_mut();
    harness.get_by_label(GENERATE_LABEL).click();
    harness.step();
    harness.step();

    assert!(
        harness.query_by_label_contains(LOADING_TEXT).is_some(),
        "spinner text should be shown while the request is in flight"
    );

    assert!(ctx.step_until(is_settled).await, "request should settle");
    let harness = ctx.harness_mut();
    harness.step();

    assert_eq!(
        harness
            .state()
            .state()
            .ctx
            .compute::<QrCodeCompute>()
            .status(),
        GenerationStatus::Ready
    );
    assert!(harness.query_by_label_contains(LOADING_TEXT).is_none());
    assert!(harness.query_by_label(DOWNLOAD_LABEL).is_some());
    assert!(harness.query_by_label(COPY_LABEL).is_some());
}

#[tokio::test]
async fn test_server_error_shows_toast() {
    let mut ctx = TestCtx::new_app().await;
    ctx.mock_generate(ResponseTemplate::new(500).set_body_string("boom"))
        .await;

    type_value(&mut ctx, "hello");
    ctx.harness_mut().get_by_label(GENERATE_LABEL).click();

    assert!(
        ctx.step_until(|app| {
            app.state()
                .ctx
                .cached::<ToastQueue>()
                .is_some_and(|toasts| !toasts.is_empty())
        })
        .await,
        "an error toast should be queued"
    );
    let harness = ctx.harness_mut();
    harness.step();

    assert!(harness.query_by_label_contains(GENERATE_ERROR_TITLE).is_some());
    assert!(harness.query_by_label_contains(SERVER_ERROR_MESSAGE).is_some());
    assert!(
        harness.query_by_label(DOWNLOAD_LABEL).is_none(),
        "no image, so no actions"
    );
}

#[tokio::test]
async fn test_clear_qr_code_resets_page() {
    let mut ctx = TestCtx::new_app().await;
    ctx.mock_generate(
        ResponseTemplate::new(200)
            .set_body_json(json!({ "qr_code_url": "https://x/y.png" }))
            .set_delay(Duration::from_millis(500)),
    )
    .await;

    type_value(&mut ctx, "hello");
    let harness = ctx.harness_mut();
    harness.get_by_label(GENERATE_LABEL).click();
    harness.step();
    harness.step();
    assert!(harness.query_by_label_contains(DISPLAY_HEADING).is_some());

    harness.get_by_label(CLEAR_QR_LABEL).click();
    harness.step();
    harness.step();

    assert!(
        harness.query_by_label_contains(DISPLAY_HEADING).is_none(),
        "display should disappear after clearing"
    );
    assert_eq!(
        harness.state().state().ctx.state::<QrPageInput>(),
        &QrPageInput::default()
    );

    // The cancelled response must never show up.
    tokio::time::sleep(Duration::from_millis(600)).await;
    harness.step();
    assert_eq!(
        harness.state().state().ctx.compute::<QrCodeCompute>(),
        &QrCodeCompute::default()
    );
}

#[tokio::test]
async fn test_clear_input_button_empties_field() {
    let mut ctx = TestCtx::new_app().await;

    type_value(&mut ctx, "hello");
    let harness = ctx.harness_mut();
    harness.get_by_label(CLEAR_INPUT_LABEL).click();
    harness.step();
    harness.step();

    assert_eq!(harness.state().state().ctx.state::<QrPageInput>().value, "");
    assert!(harness.query_by_label(CLEAR_INPUT_LABEL).is_none());
}

#[tokio::test]
async fn test_copy_button_copies_image() {
    let mut ctx = TestCtx::new_app().await;
    let image_url = ctx.image_url();
    ctx.mock_generate(ResponseTemplate::new(200).set_body_json(json!({ "qr_code_url": image_url })))
        .await;
    ctx.mock_image(sample_png()).await;

    type_value(&mut ctx, "hello");
    ctx.harness_mut().get_by_label(GENERATE_LABEL).click();
    assert!(ctx.step_until(is_settled).await, "request should settle");

    ctx.harness_mut().get_by_label(COPY_LABEL).click();
    assert!(
        ctx.step_until(|app| {
            app.state()
                .ctx
                .cached::<ToastQueue>()
                .and_then(|toasts| toasts.toasts().last())
                .is_some_and(|toast| toast.title == COPIED_IMAGE_TITLE)
        })
        .await,
        "copy should report success"
    );

    assert_eq!(
        ctx.clipboard().writes(),
        vec![ClipboardWrite::Image {
            width: 8,
            height: 8
        }]
    );
}
