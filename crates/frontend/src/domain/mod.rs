pub mod a001_stock_lot;
pub mod a002_product;
pub mod a003_sale;
