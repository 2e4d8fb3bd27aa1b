pub mod api_utils;
pub mod clipboard;
pub mod clock;
pub mod components;
pub mod download;
pub mod icons;
pub mod list_utils;
pub mod page_frame;
pub mod page_standard;
pub mod query_cache;
pub mod realtime;
pub mod toast;
