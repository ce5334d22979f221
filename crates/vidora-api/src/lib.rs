//! Vidora API Library
//!
//! HTTP surface of the video service: handlers, extractors, application state
//! and router setup. The binary in `main.rs` wires these together; the
//! integration tests build the same router around in-memory dependencies.

pub mod auth;
pub mod constants;
pub mod error;
pub mod response;
pub mod services;
pub mod setup;
pub mod state;

mod api_doc;
mod handlers;
mod middleware;
mod telemetry;
mod utils;
