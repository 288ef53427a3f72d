#![forbid(unsafe_code)]

//! # Admin Console
//!
//! Terminal admin panel for a home-cooked food delivery service, built on
//! the `datagrid` engine.
//!
//! The binary and the integration tests share everything through this
//! library.
//!
//! ## Public Modules
//!
//! - [`app`] - Command dispatch and output
//! - [`cli`] - Command-line arguments
//! - [`config`] - Runtime configuration and the config file
//! - [`data`] - Orders, users and restaurants, plus the demo generator
//! - [`logging`] - Tracing subscriber setup
//! - [`pages`] - Table pages and the dashboard
//! - [`render`] - Plain-text tables and stat cards
//! - [`session`] - Signed-in admin and output theme
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p admin_console -- list orders --filter status=pending
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod pages;
pub mod render;
pub mod session;
