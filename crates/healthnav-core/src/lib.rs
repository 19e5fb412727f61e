// Core business logic lives here - the brain of the operation
pub mod bundled;
pub mod compare;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod quality;
pub mod remote;
pub mod saved;
pub mod sources;

pub use bundled::BundledData;
pub use compare::{AddOutcome, CompareManager, MAX_COMPARE};
pub use config::Config;
pub use error::Error;
pub use filter::evaluate;
pub use quality::QualityLevel;
pub use remote::{BackendClient, Directory};
pub use saved::{SavedManager, MAX_RECENT_SEARCHES};
pub use sources::{Availability, BackendStatus, DataSources, Fetched, SourceState};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
