pub mod credit;
pub mod dto;
pub mod requests;
pub mod warranty;

pub use credit::{AcceptCreditRequest, CreditAuthorization, RejectCreditRequest};
pub use dto::*;
pub use warranty::{Warranty, WarrantyState};
