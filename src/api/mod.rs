mod client;
pub mod status;
pub mod types;

pub use client::OverseerrClient;
