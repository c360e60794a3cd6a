// Per-property detail enrichment: one upstream lookup per address, reduced
// to a fixed sanitized shape.

pub mod client;
pub mod sanitize;

pub use client::{DetailClient, DetailError, DETAIL_HOST};
pub use sanitize::{sanitize_details, LastSale, SanitizedDetail};
