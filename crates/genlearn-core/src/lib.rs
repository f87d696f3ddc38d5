//! Domain layer of the GenLearn client.
//!
//! Models, the crate-wide error type, the learning session phase machine,
//! client-side stores and the gateway traits the HTTP layer implements.

pub mod auth;
pub mod error;
pub mod features;
pub mod feynman;
pub mod history;
pub mod media;
pub mod quiz;
pub mod serde_helpers;
pub mod session;
pub mod social;
pub mod store;
pub mod user;

pub use error::{GenlearnError, Result};
