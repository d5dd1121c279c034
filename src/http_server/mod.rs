//! # HTTP Boundary
//!
//! Axum router over the storage engine: multipart upload, download with
//! attachment disposition, delete, rename, and move.

pub mod config;
pub mod files_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use files_routes::{files_routes, FilesState};
pub use server::HttpServer;
