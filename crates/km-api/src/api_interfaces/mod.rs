pub mod account;
pub mod details;
pub mod listing;
