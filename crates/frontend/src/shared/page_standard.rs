//! Page category constants for tab page standardization.
//!
//! Every page rendered inside a tab declares an HTML `id` in the format
//! `{entity}--{category}` (e.g. `"p900_inventory--list"`) and a
//! `data-page-category` with one of the constants below.

/// Table of records with search and sorting.
pub const PAGE_CAT_LIST: &str = "list";

/// Detail / edit form for a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Widgets over several independent reads.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Read-only document preview (receipts).
pub const PAGE_CAT_DOCUMENT: &str = "document";
