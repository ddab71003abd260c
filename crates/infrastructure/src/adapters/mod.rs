//! Infrastructure adapters

mod envelope;
mod platform_client;
mod refresh_endpoint;

pub use platform_client::PlatformClient;
pub use refresh_endpoint::RefreshEndpoint;
