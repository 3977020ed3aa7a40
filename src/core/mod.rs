pub mod changelog;
pub mod context;
pub mod defaults;
pub mod error;
pub mod features;
pub mod manifest;
pub mod paths;
pub mod publish;
pub mod release;
pub mod setup;
pub mod templates;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
