//! Tabs: key format, titles, and the key → page registry.

pub mod keys;
pub mod page;
pub mod registry;
pub mod tab_labels;

pub use keys::TabKey;
pub use page::TabPage;
pub use tab_labels::{detail_tab_label, tab_label_for_key};
