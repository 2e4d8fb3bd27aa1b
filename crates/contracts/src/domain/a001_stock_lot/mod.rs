pub mod aggregate;
pub mod edit;

pub use aggregate::{StockKind, StockToEdit};
pub use edit::{EditStockPhase, StockDatesForm, StockToEditQuery, UpdateStockDatesRequest};
