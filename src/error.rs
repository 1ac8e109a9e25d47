use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The metadata table does not have the expected shape.
    #[error("malformed metadata table at JSON path {path}: {message}")]
    Metadata { path: String, message: String },

    #[error("failed to read metadata table {}: {source}", path.display())]
    ReadMetadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A node type with an empty name has no builder name.
    #[error("node type with an empty name in NODE_FIELDS")]
    EmptyTypeName,

    #[error("failed to render oneOf literal: {0}")]
    Literal(#[from] serde_json::Error),

    #[error("failed to write declarations to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is out of date; re-run generation", path.display())]
    Stale { path: PathBuf },
}
