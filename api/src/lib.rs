//! Typed contract and HTTP client for the My Dungeon fortune API.
//!
//! The backend owns every fortune computation. This crate only knows the JSON
//! shapes it accepts and returns, and how to turn a failed call into a message
//! that can be shown to the user.

mod client;
mod error;
pub mod model;

pub use client::{ApiClient, COMPATIBILITY_PATH, GENERATE_PATH};
pub use error::{ApiError, Result};
pub use model::*;

/// `YYYY-MM-DD` as expected by the generate endpoints.
pub fn format_birthdate(year: i32, month: u8, day: u8) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

/// `HH:MM` as expected by the generate endpoints.
pub fn format_birthtime(hour: u8, minute: u8) -> String {
    format!("{hour:02}:{minute:02}")
}

/// Blank names are sent as `null`.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
