//! Utility functions and helpers

pub mod time;

pub use time::{format_rfc1123z, server_time};
