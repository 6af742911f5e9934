//! HTTP API: authentication middleware, routing, and error mapping.

pub mod app;
pub mod middleware;
