pub mod config;
pub mod detail;
pub mod error;
pub mod events;
pub mod filter;
pub mod routes;
pub mod schedule;
pub mod session;
pub mod tracing;
