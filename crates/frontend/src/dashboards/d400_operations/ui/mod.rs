mod credits;
mod dashboard;
mod requests;
mod sales;
mod service;
mod widget;

pub use dashboard::OperationsDashboard;
