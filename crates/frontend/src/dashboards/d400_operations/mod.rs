//! Operations dashboard
//!
//! - api.rs: reads and actions of every widget
//! - ui/: dashboard page and widgets
pub mod api;
pub mod ui;
