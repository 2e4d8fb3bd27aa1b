pub mod columns;
pub mod dto;
pub mod sorting;

pub use columns::{inventory_columns, InventoryColumn};
pub use dto::{BranchStock, INVENTORY_PATH, ProductInventoryRow, ProrationRecord, StockLot};
