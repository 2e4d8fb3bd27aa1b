//! Sale receipt: HTML preview plus an in-browser A4 PDF.

mod model;
mod page;
pub mod pdf;

pub use page::InvoicePage;
