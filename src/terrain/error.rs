use thiserror::Error;

use crate::terrain::coords::TileCoords;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("invalid terrain config: {0}")]
    InvalidConfig(String),

    /// A tile would grow past the configured buffer limits. Generation is
    /// deterministic, so the same inputs will always fail the same way.
    #[error("tile {tile} needs {requested} units, limit is {limit}")]
    ResourceLimitExceeded {
        tile: TileCoords,
        requested: usize,
        limit: usize,
    },

    #[error("tile sink rejected tile: {0}")]
    Sink(String),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
