//! Cafe directory HTTP service
//!
//! Serves `GET /cafe?city=..&count=..&search=..` from an in-memory,
//! read-only cafe directory.

pub mod cafe;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
