//! External service adapters

pub mod classifier;
