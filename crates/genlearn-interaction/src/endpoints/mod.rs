//! Gateway trait implementations for [`ApiClient`](crate::ApiClient).

mod account;
mod competition;
mod features;
mod feynman;
mod learning;
mod media;
