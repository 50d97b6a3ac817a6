/// Filesystem adapters: JSON snapshot and positions readers, report writers
mod file_writer;
mod snapshot_reader;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use snapshot_reader::{JsonPositionsFile, JsonSnapshotReader};
