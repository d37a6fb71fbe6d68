mod batch_tests;

use std::sync::Arc;

use crate::terrain::{
    config::TerrainConfig,
    generator::HeightField,
    noise::{ConstantNoise, NoiseSource},
};

/// Noise driven by a closure over the noise-space coordinates.
pub(super) struct FnNoise<F>(pub F);

impl<F> NoiseSource for FnNoise<F>
where
    F: Fn(f32, f32) -> f32 + Send + Sync,
{
    fn fractal_noise_2d(&self, x: f32, z: f32, _octaves: u32, _frequency: f32, _persistence: f32) -> f32 {
        (self.0)(x, z)
    }
}

/// Recovers the integer world column from a noise-space coordinate.
pub(super) fn world_column(w: f32) -> i32 {
    (w / super::POSITION_SCALE).round() as i32
}

/// Height field whose elevation is exactly `height(world_x, world_z)`:
/// the ground layer cancels its own bias and amplitude is 1.
pub(super) fn sculpted_field<F>(size: usize, height: F) -> HeightField
where
    F: Fn(i32, i32) -> f32 + Send + Sync + 'static,
{
    let ground: Arc<dyn NoiseSource> = Arc::new(ConstantNoise(-0.1));
    let mountain: Arc<dyn NoiseSource> =
        Arc::new(FnNoise(move |x: f32, z: f32| height(world_column(x), world_column(z))));
    HeightField::new(ground, mountain, 1.0, 1.0, 1.0, size)
}

pub(super) fn small_config(size: usize) -> TerrainConfig {
    TerrainConfig {
        heightmap_size: size,
        tiles_x: 2,
        tiles_z: 2,
        amplitude: 1.0,
        ..Default::default()
    }
}
