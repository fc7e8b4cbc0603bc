//! Wikipedia page HTML lookups

pub mod client;

pub use client::WikipediaClient;
