/// Filesystem adapters: tree traversal and file I/O
mod file_reader;
mod file_writer;
mod walker;

pub use file_reader::{normalize_bytes, EncodingNormalizingReader};
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use walker::WalkdirDirectoryWalker;
