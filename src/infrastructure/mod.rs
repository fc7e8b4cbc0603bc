//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - Dig-site feed, occurrence detail and Wikipedia HTTP clients (reqwest)
//! - Snapshot slot storage (file and in-memory)
//! - Headless map surface
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod feed;
pub mod http;
pub mod logging;
pub mod paleobiodb;
pub mod storage;
pub mod surface;
pub mod wikipedia;
