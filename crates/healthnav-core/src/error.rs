use thiserror::Error;

/// All the ways things can go wrong in the navigator core
///
/// We use thiserror here because it generates the boilerplate for us.
/// Life's too short to manually implement Display and Error traits.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Backend error: {0}")]
    Api(#[from] healthnav_api::ApiError),

    #[error("Storage error: {0}")]
    Store(#[from] healthnav_store::StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
