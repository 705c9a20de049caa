use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by a split run.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("No such directory: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
