pub mod advisor;
pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod server;

pub use error::{Error, Result};
