// Pafari shared type definitions
// Each submodule defines types used across the pages, stores and services.

pub mod bookmark;
pub mod errors;
pub mod history;
pub mod memory;
pub mod privacy;
pub mod request;
pub mod settings;
pub mod web_app;
