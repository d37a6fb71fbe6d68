// src/sink.rs

use crate::terrain::{error::Result, generator::Tile};

/// Consumer of finished tiles, e.g. a renderer creating drawables and
/// colliders from the combined meshes.
pub trait TileSink {
    fn submit(&mut self, tile: Tile) -> Result<()>;

    /// Called once after the last tile.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl TileSink for Vec<Tile> {
    fn submit(&mut self, tile: Tile) -> Result<()> {
        self.push(tile);
        Ok(())
    }
}
