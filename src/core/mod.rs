// Public modules
pub mod archive;
pub mod error;
pub mod extension_fix;
pub mod hasher;
pub mod mime_sniff;
pub mod template;

// Public modules for CLI access
pub mod defaults;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
