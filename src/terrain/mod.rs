pub mod config;
pub mod coords;
pub mod error;
pub mod generator;
pub mod mesh;
pub mod noise;
pub mod sink;

pub use config::TerrainConfig;
pub use coords::{ColumnCoords, TileCoords};
pub use error::{Result, TerrainError};
pub use generator::{TerrainGenerator, Tile};
pub use mesh::Mesh;
pub use sink::TileSink;
