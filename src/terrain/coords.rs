// src/coords.rs

use std::fmt;

use nalgebra::Vector3;

/// Tile indices on the XZ plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileCoords {
    pub x: i32,
    pub z: i32,
}

impl TileCoords {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World-space position of a column given in tile-local coordinates.
    /// Local coordinates may fall outside `[0, size)` for neighbor lookups.
    pub fn to_world_column(&self, size: usize, local: ColumnCoords) -> (i64, i64) {
        (
            self.x as i64 * size as i64 + local.x as i64,
            self.z as i64 * size as i64 + local.z as i64,
        )
    }

    /// Offset at which this tile's mesh is placed in the world.
    pub fn world_offset(&self, size: usize) -> Vector3<f32> {
        Vector3::new(
            (self.x as i64 * size as i64) as f32,
            0.0,
            (self.z as i64 * size as i64) as f32,
        )
    }
}

impl fmt::Display for TileCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.z)
    }
}

/// Column position inside a tile's height field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColumnCoords {
    pub x: i32,
    pub z: i32,
}

impl ColumnCoords {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The four axis-aligned neighbors: +x, -x, -z, +z.
    pub fn neighbors(&self) -> [ColumnCoords; 4] {
        [
            ColumnCoords::new(self.x + 1, self.z),
            ColumnCoords::new(self.x - 1, self.z),
            ColumnCoords::new(self.x, self.z - 1),
            ColumnCoords::new(self.x, self.z + 1),
        ]
    }
}
