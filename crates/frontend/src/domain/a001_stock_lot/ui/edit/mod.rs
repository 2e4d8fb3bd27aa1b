//! Stock lot date editing
//!
//! - model.rs: API functions (fetch, update)
//! - view_model.rs: phase, form and the save command
//! - page.rs: Leptos component

mod model;
mod page;
mod view_model;

pub use page::EditStockPage;
pub use view_model::EditStockVm;
