//! Cloud API surface: HTTP transport, endpoint-aware client, identity ops.

pub mod client;
pub mod http;
pub mod identity;

pub use client::ApiClient;
