pub mod receipt;

pub use receipt::{Receipt, ReceiptCustomer, ReceiptLine, Sale};
