//! QuickQR desktop front end: type text, get a QR code back from the generator
//! endpoint, then save or copy it.

pub mod app;
pub mod pages;
pub mod state;
pub mod utils;
pub mod widgets;

pub use app::QuickQrApp;
