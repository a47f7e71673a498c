//! Library half of `tef-server`: configuration, logging setup, CLI parsing,
//! and the HTTP surface, split out from `main.rs` so integration tests can
//! exercise [`http::router`] directly against a mock transport.

pub mod cli;
pub mod config;
pub mod http;
pub mod logging;
