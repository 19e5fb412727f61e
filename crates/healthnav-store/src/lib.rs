// SQLite-backed durable storage for the small client-side collections
// (compare list, saved providers, recent searches). Keeps the app state
// across restarts without dragging in a real database server.

pub mod store;

pub use store::{SetStore, StoreError};

pub type Result<T> = std::result::Result<T, StoreError>;
