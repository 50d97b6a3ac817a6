/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod console;
pub mod filesystem;
pub mod formatters;
pub mod network;

pub use console::StderrProgressReporter;
pub use filesystem::{FileSystemWriter, JsonPositionsFile, JsonSnapshotReader, StdoutPresenter};
pub use formatters::{JsonFormatter, MarkdownFormatter};
pub use network::{BackendClient, CachingPositionRepository};
