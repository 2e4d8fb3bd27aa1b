pub mod api_error;
pub mod dates;
pub mod lenient;
pub mod money;
pub mod query_key;
pub mod realtime;
