//! Seed-driven cube terrain: noise height fields rasterized into unit cubes
//! and batched into one mesh per tile.

pub mod terrain;

pub use terrain::{TerrainConfig, TerrainError, TerrainGenerator, Tile, TileCoords, TileSink};
