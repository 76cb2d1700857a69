//! Shared helpers: dates, URLs, pluralization.

pub mod date;
pub mod plural;
pub mod url;
