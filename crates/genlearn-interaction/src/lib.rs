//! HTTP interaction layer for the GenLearn backend.
//!
//! [`ApiClient`] implements every gateway trait from `genlearn-core`, so the
//! application layer can depend on the traits and tests can swap in mocks.

pub mod client;
pub mod decode;
mod endpoints;

pub use client::{API_KEY_HEADER, ApiClient};
