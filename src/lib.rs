//! Placemark: parse free-text GPS lines, merge points that lie within a
//! distance threshold of each other, and emit map marker records.

pub mod config;
pub mod geo;
pub mod place;
pub mod server;
