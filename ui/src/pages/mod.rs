//! Pages module for the application.
//!
//! QuickQR has a single page, `index_page`, hosting the generator.

mod index_page;

pub use index_page::index_page;
