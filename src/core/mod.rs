//! Core library components.

pub mod azure;
pub mod env;
pub mod settings;
pub mod writer;
