pub mod confirm_dialog;
pub mod stat_card;
pub mod status;
pub mod ui;
