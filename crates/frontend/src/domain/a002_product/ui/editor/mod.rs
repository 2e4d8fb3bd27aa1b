//! Product / presentation editor
//!
//! - model.rs: API functions (reference data, detail fetch, submit)
//! - view_model.rs: field signals, row editing and the save command
//! - page.rs: page component
//! - prices.rs, presentations.rs: row editors

mod model;
mod page;
mod presentations;
mod prices;
mod view_model;

pub use page::ProductEditor;
pub use view_model::ProductEditorVm;
