//! HTTP API: configuration, composition root, routing and response mapping.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
