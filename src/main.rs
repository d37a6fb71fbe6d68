use std::error::Error;

use clap::Parser;
use colorgrad::Gradient;
use image::{Rgb, RgbImage};

use cubic_terrain::terrain::{Result, TerrainConfig, TerrainGenerator, Tile, TileSink};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the ground noise layer
    #[arg(long, default_value_t = 0)]
    ground_seed: u32,

    /// Feature size of the ground layer (larger is broader)
    #[arg(long, default_value_t = 800.0)]
    ground_frequency: f32,

    /// Seed for the mountain noise layer
    #[arg(long, default_value_t = 1)]
    mountain_seed: u32,

    /// Feature size of the mountain layer (larger is broader)
    #[arg(long, default_value_t = 1200.0)]
    mountain_frequency: f32,

    /// Number of tiles along x
    #[arg(long, default_value_t = 2)]
    tiles_x: u32,

    /// Number of tiles along z
    #[arg(long, default_value_t = 2)]
    tiles_z: u32,

    /// Side length of each tile's height map
    #[arg(short = 's', long, default_value_t = 513)]
    size: usize,

    /// Scale applied to the combined noise layers
    #[arg(short, long, default_value_t = 100.0)]
    amplitude: f32,

    /// Don't stack skirt cubes under cliffs
    #[arg(long)]
    no_fill_gaps: bool,

    /// Maximum cubes generated for a single tile
    #[arg(long, default_value_t = 4_000_000)]
    max_cubes: usize,

    /// Build tiles one at a time
    #[arg(long)]
    sequential: bool,

    /// Write a top-down height preview PNG here
    #[arg(short, long)]
    preview: Option<String>,

    /// Pixels per column when rendering the preview
    #[arg(long, default_value_t = 1)]
    scale: u32,
}

impl Args {
    fn to_config(&self) -> TerrainConfig {
        TerrainConfig {
            ground_seed: self.ground_seed,
            ground_frequency: self.ground_frequency,
            mountain_seed: self.mountain_seed,
            mountain_frequency: self.mountain_frequency,
            tiles_x: self.tiles_x,
            tiles_z: self.tiles_z,
            heightmap_size: self.size,
            amplitude: self.amplitude,
            fill_gaps: !self.no_fill_gaps,
            max_cubes_per_tile: self.max_cubes,
            parallel: !self.sequential,
        }
    }
}

/// Logs per-tile stats and keeps the height grids for the preview.
struct StatsSink {
    tiles: Vec<(i32, i32, Vec<f32>)>,
    vertices: usize,
    triangles: usize,
}

impl StatsSink {
    fn new() -> Self {
        Self {
            tiles: Vec::new(),
            vertices: 0,
            triangles: 0,
        }
    }
}

impl TileSink for StatsSink {
    fn submit(&mut self, tile: Tile) -> Result<()> {
        let triangles: usize = tile.meshes.iter().map(|m| m.triangle_count()).sum();
        log::info!(
            "Tile {} at ({}, {}, {}): {} meshes, {} vertices, {} triangles",
            tile.name,
            tile.world_offset.x,
            tile.world_offset.y,
            tile.world_offset.z,
            tile.meshes.len(),
            tile.vertex_count(),
            triangles
        );
        self.vertices += tile.vertex_count();
        self.triangles += triangles;
        self.tiles
            .push((tile.coords.x, tile.coords.z, tile.heights.into_vec()));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        log::info!(
            "Generated {} tiles: {} vertices, {} triangles",
            self.tiles.len(),
            self.vertices,
            self.triangles
        );
        Ok(())
    }
}

/// Pixel size of the whole-world preview, or `None` if it does not fit `u32`.
fn preview_dimensions(config: &TerrainConfig, scale: u32) -> Option<(u32, u32)> {
    let size = u32::try_from(config.heightmap_size).ok()?;
    let side = size.checked_mul(scale)?;
    Some((config.tiles_x.checked_mul(side)?, config.tiles_z.checked_mul(side)?))
}

struct TerrainVisualizer {
    gradient: Gradient,
}

impl TerrainVisualizer {
    fn new() -> std::result::Result<Self, Box<dyn Error>> {
        let gradient = colorgrad::CustomGradient::new()
            .colors(&[
                colorgrad::Color::new(0.0, 0.0, 0.5, 1.0), // Lowland
                colorgrad::Color::new(0.9, 0.9, 0.2, 1.0), // Sand
                colorgrad::Color::new(0.0, 0.6, 0.0, 1.0), // Grass
                colorgrad::Color::new(0.5, 0.3, 0.0, 1.0), // Mountain
                colorgrad::Color::new(1.0, 1.0, 1.0, 1.0), // Snow
            ])
            .domain(&[0.0, 0.15, 0.3, 0.75, 1.0])
            .build()?;
        Ok(Self { gradient })
    }

    fn save_height_preview(
        &self,
        sink: &StatsSink,
        config: &TerrainConfig,
        scale: u32,
        output_path: &str,
    ) -> std::result::Result<(), Box<dyn Error>> {
        let size = config.heightmap_size;
        let (low, high) = sink
            .tiles
            .iter()
            .flat_map(|(_, _, heights)| heights.iter().copied())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), h| (lo.min(h), hi.max(h)));
        let range = (high - low).max(f32::EPSILON);

        let (img_w, img_h) = preview_dimensions(config, scale).ok_or_else(|| {
            format!(
                "preview of {}x{} tiles of size {} at scale {} is too large",
                config.tiles_x, config.tiles_z, size, scale
            )
        })?;
        let mut img = RgbImage::new(img_w, img_h);

        for (tx, tz, heights) in &sink.tiles {
            for (i, h) in heights.iter().enumerate() {
                let x = (*tx as usize * size + i % size) as u32;
                let z = (*tz as usize * size + i / size) as u32;
                let c = self.gradient.at(((h - low) / range) as f64);
                let color = Rgb([(c.r * 255.0) as u8, (c.g * 255.0) as u8, (c.b * 255.0) as u8]);
                for dy in 0..scale {
                    for dx in 0..scale {
                        img.put_pixel(x * scale + dx, z * scale + dy, color);
                    }
                }
            }
        }

        img.save(output_path)?;
        Ok(())
    }
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.to_config();

    log::info!(
        "Generating {}x{} tiles of size {} (seeds {}/{})",
        config.tiles_x,
        config.tiles_z,
        config.heightmap_size,
        config.ground_seed,
        config.mountain_seed
    );

    let generator = TerrainGenerator::new(config)?;
    let mut sink = StatsSink::new();
    generator.generate_into(&mut sink)?;

    if let Some(path) = &args.preview {
        log::info!("Saving height preview to {}...", path);
        TerrainVisualizer::new()?.save_height_preview(&sink, generator.config(), args.scale.max(1), path)?;
    }

    log::info!("Done!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_dimensions() {
        let config = TerrainConfig { tiles_x: 3, tiles_z: 2, heightmap_size: 5, ..Default::default() };
        assert_eq!(preview_dimensions(&config, 4), Some((60, 40)));
    }

    #[test]
    fn test_preview_dimensions_overflow() {
        let config = TerrainConfig { tiles_x: 2, tiles_z: 2, heightmap_size: 1 << 16, ..Default::default() };
        assert_eq!(preview_dimensions(&config, 1 << 16), None);

        let wide = TerrainConfig { tiles_x: u32::MAX, tiles_z: 1, heightmap_size: 2, ..Default::default() };
        assert_eq!(preview_dimensions(&wide, 1), None);
    }

    #[test]
    fn test_preview_dimensions_size_beyond_u32() {
        let config = TerrainConfig { heightmap_size: u32::MAX as usize + 1, ..Default::default() };
        assert_eq!(preview_dimensions(&config, 1), None);
    }
}
