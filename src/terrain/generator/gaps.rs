use crate::terrain::{
    coords::{ColumnCoords, TileCoords},
    generator::heightmap::HeightField,
};

/// Heights of the skirt cubes stacked under a column.
///
/// Cube `i` (0-based) sits at `top - (i + 1)`, so the stack grows downward
/// from directly beneath the top cube.
#[derive(Clone, Debug, PartialEq)]
pub struct Skirt {
    top: f32,
    count: usize,
}

impl Skirt {
    pub const NONE: Skirt = Skirt { top: 0.0, count: 0 };

    /// Skirt for a column of `height` whose lowest neighbor is `low`.
    ///
    /// `low == 0.0` means "no fill", even though zero is also a legal
    /// elevation. A drop of one unit or less is covered by the top cube.
    pub fn between(height: f32, low: f32) -> Self {
        if low == 0.0 || height - low <= 1.0 {
            return Skirt::NONE;
        }
        Skirt {
            top: height,
            count: (height - low).floor() as usize,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn heights(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.count).map(move |i| self.top - (i + 1) as f32)
    }
}

/// Closes vertical holes between a column and much lower neighbors.
pub struct GapFiller<'a> {
    field: &'a HeightField,
}

impl<'a> GapFiller<'a> {
    pub fn new(field: &'a HeightField) -> Self {
        Self { field }
    }

    /// Minimum elevation of the four axis neighbors, recomputed from the
    /// height field rather than read from a grid since neighbors may lie in
    /// the adjacent tile.
    pub fn lowest_neighbor(&self, tile: TileCoords, column: ColumnCoords) -> f32 {
        column
            .neighbors()
            .iter()
            .map(|&n| self.field.elevation(tile, n))
            .fold(f32::INFINITY, f32::min)
    }

    pub fn skirt(&self, tile: TileCoords, column: ColumnCoords, height: f32) -> Skirt {
        let low = self.lowest_neighbor(tile, column);
        Skirt::between(height, low)
    }

    pub fn skirt_count(&self, tile: TileCoords, column: ColumnCoords, height: f32) -> usize {
        self.skirt(tile, column, height).count()
    }
}
