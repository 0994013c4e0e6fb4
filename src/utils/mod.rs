//! Generic utility primitives with zero domain knowledge.
//!
//! - `args` - Platform-aware CLI argument normalization
//! - `chunk` - Fixed-size string chunking
//! - `extensions` - Comma-separated extension list parsing
//! - `io` - File I/O with consistent error handling
//! - `platform` - Host platform detection via injectable probes

pub mod args;
pub mod chunk;
pub mod extensions;
pub mod io;
pub mod platform;
