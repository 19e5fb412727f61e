// HTTP transport for the Healthcare Navigator backend
pub mod client;
pub mod retry;

pub use client::{ApiClient, ApiError, HealthCheck};
pub use retry::RetryConfig;

pub type Result<T> = std::result::Result<T, ApiError>;
