mod api_interfaces;
pub mod auth;
pub mod client;
pub mod comments;
pub mod config;
pub mod constants;
pub mod details;
pub mod error;
pub mod favorites;
pub mod feedback;
pub mod fetcher;
pub mod filter;
pub mod listing;
pub mod mapper;
pub mod paginate;
pub mod pipeline;
pub mod session;
pub mod sort;
mod util;

pub use client::Client;
pub use config::Config;
pub use listing::{Listing, Status};
pub use session::{Session, SessionManager};
