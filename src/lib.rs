//! Pafari: internal `about:` pages for a WebKit-based web browser.
//!
//! This library crate exposes all modules for use by the host binary and integration tests.

pub mod about;
pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
