pub mod api;
pub mod config;
pub mod conversion;
pub mod deletion;
pub mod effects;
pub mod error;
pub mod format;
pub mod link;
pub mod model;
pub mod platform;
pub mod projection;
pub mod session;
pub mod view_state;
pub mod views;

pub use error::{Error, Result};
