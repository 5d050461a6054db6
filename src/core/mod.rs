// Public modules
pub mod batch;
pub mod config;
pub mod error;
pub mod locator;
pub mod rewrite;

// Re-export common types for convenience
pub use batch::{BatchOptions, BatchReport, FileReport, FileStatus};
pub use error::{Error, ErrorCode, Result};
