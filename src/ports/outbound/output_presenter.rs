use crate::shared::Result;

/// OutputPresenter port for presenting the rendered report
///
/// This port abstracts the output destination (stdout, file, etc.).
pub trait OutputPresenter {
    /// Presents the rendered report
    ///
    /// # Arguments
    /// * `content` - The formatted report
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The target path is a symlink or its parent directory is missing
    fn present(&self, content: &str) -> Result<()>;
}
