mod articles;
mod auth;
pub mod client;
mod topics;
pub mod types;

pub use client::*;
pub use types::*;
