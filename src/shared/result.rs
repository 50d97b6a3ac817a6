/// Result alias used throughout the crate; errors carry context via `anyhow`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
