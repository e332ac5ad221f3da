/// OCR backend API module
///
/// This module handles everything that crosses the network:
/// - The reqwest client and the multipart upload (client.rs)
/// - Error taxonomy and user-facing messages (error.rs)
/// - JSON reply types (types.rs)

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
