pub mod account;
pub mod features;
pub mod feynman;
pub mod learn;
pub mod media;
pub mod quiz;
pub mod social;
