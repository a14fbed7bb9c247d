mod features;
mod qr_display;
mod qr_input;
mod toasts;

pub use features::{FEATURES, FOOTER_TEXT, PAGE_TAGLINE, PAGE_TITLE, feature_cards, footer, page_header};
pub use qr_display::{
    CLEAR_QR_LABEL, COPY_LABEL, DISPLAY_HEADING, DOWNLOAD_LABEL, LOADING_TEXT, QR_IMAGE_ALT,
    qr_display,
};
pub use qr_input::{CLEAR_INPUT_LABEL, GENERATE_LABEL, INPUT_CAPTION, INPUT_HINT, qr_input};
pub use toasts::{DISMISS_LABEL, toasts};
