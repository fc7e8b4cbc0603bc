//! Paleobiology Database occurrence lookups

pub mod client;

pub use client::PaleoDbClient;
