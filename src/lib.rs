//! Hearth - minimal HTTP/1.1 server
//!
//! Core library: wire parsing, routing, static files and response
//! serialization.

pub mod config;
pub mod error;
pub mod http;
pub mod server;
