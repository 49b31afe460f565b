//! Helpers shared by the console binary and library crates.

pub mod utils;
