// src/config.rs

use crate::terrain::error::{Result, TerrainError};

/// Everything a generation run reads before it starts. Not reloaded.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainConfig {
    pub ground_seed: u32,
    /// Feature-size divisor for the ground layer. Larger values give broader features.
    pub ground_frequency: f32,
    pub mountain_seed: u32,
    pub mountain_frequency: f32,
    /// Number of tiles along x.
    pub tiles_x: u32,
    /// Number of tiles along z.
    pub tiles_z: u32,
    /// Side length `S` of each tile's height field.
    pub heightmap_size: usize,
    /// Scale applied to the combined noise layers.
    pub amplitude: f32,
    pub fill_gaps: bool,
    /// Hard ceiling on cubes (top + skirt) generated for one tile.
    pub max_cubes_per_tile: usize,
    /// Build tiles on the rayon pool.
    pub parallel: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            ground_seed: 0,
            ground_frequency: 800.0,
            mountain_seed: 1,
            mountain_frequency: 1200.0,
            tiles_x: 2,
            tiles_z: 2,
            heightmap_size: 513,
            amplitude: 100.0,
            fill_gaps: true,
            max_cubes_per_tile: 4_000_000,
            parallel: true,
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.heightmap_size == 0 {
            return Err(TerrainError::InvalidConfig("heightmap_size must be at least 1".into()));
        }
        if self.heightmap_size > i32::MAX as usize {
            return Err(TerrainError::InvalidConfig(format!(
                "heightmap_size {} does not fit tile-local coordinates",
                self.heightmap_size
            )));
        }
        if self.tiles_x == 0 || self.tiles_z == 0 {
            return Err(TerrainError::InvalidConfig(format!(
                "tile counts must be positive, got {}x{}",
                self.tiles_x, self.tiles_z
            )));
        }
        for (name, frequency) in [
            ("ground_frequency", self.ground_frequency),
            ("mountain_frequency", self.mountain_frequency),
        ] {
            if !frequency.is_finite() || frequency <= 0.0 {
                return Err(TerrainError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {frequency}"
                )));
            }
        }
        if !self.amplitude.is_finite() {
            return Err(TerrainError::InvalidConfig(format!(
                "amplitude must be finite, got {}",
                self.amplitude
            )));
        }
        if self.max_cubes_per_tile == 0 {
            return Err(TerrainError::InvalidConfig("max_cubes_per_tile must be at least 1".into()));
        }
        if self.columns_per_tile() > self.max_cubes_per_tile {
            return Err(TerrainError::InvalidConfig(format!(
                "{} columns per tile exceed max_cubes_per_tile {}",
                self.columns_per_tile(),
                self.max_cubes_per_tile
            )));
        }
        Ok(())
    }

    /// Columns per tile, i.e. the minimum number of cubes a tile produces.
    pub fn columns_per_tile(&self) -> usize {
        self.heightmap_size.saturating_mul(self.heightmap_size)
    }
}
