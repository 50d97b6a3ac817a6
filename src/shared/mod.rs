/// Shared error types, result alias and file guards used across layers
pub mod error;
pub mod file_guard;
pub mod result;

pub use result::Result;
