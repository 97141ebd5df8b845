//! HTTP implementation of the content backend port.

pub mod client;
pub mod detail;

pub use client::HttpContentBackend;
