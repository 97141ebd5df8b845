//! Infrastructure layer for Pressroom.
//!
//! Contains implementations of the ports defined in `pressroom-core`: the
//! HTTP content backend, SQLite session storage, and the configuration
//! loader.

pub mod config;
pub mod http;
pub mod sqlite;
