// src/noise.rs

use ::noise::{NoiseFn, Perlin};

/// Seeded 2D fractal noise.
///
/// Implementations must be deterministic: the same seed and arguments always
/// give the same value. The domain is every real `(x, z)`; the range is not
/// constrained, callers clamp as needed.
pub trait NoiseSource: Send + Sync {
    fn fractal_noise_2d(&self, x: f32, z: f32, octaves: u32, frequency: f32, persistence: f32) -> f32;
}

/// Perlin noise summed over octaves.
///
/// Each octave doubles the sampling rate and halves the weight. `frequency`
/// divides the input coordinates, so larger values give broader features;
/// `persistence` is the weight of the first octave.
#[derive(Clone)]
pub struct PerlinNoise {
    noise: Perlin,
    seed: u32,
}

impl PerlinNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseSource for PerlinNoise {
    fn fractal_noise_2d(&self, x: f32, z: f32, octaves: u32, frequency: f32, persistence: f32) -> f32 {
        let x = x as f64;
        let z = z as f64;
        let frequency = frequency as f64;
        let persistence = persistence as f64;

        let mut gain = 1.0;
        let mut sum = 0.0;
        for _ in 0..octaves {
            let sample_x = x * gain / frequency;
            let sample_z = z * gain / frequency;
            sum += self.noise.get([sample_x, sample_z]) * persistence / gain;
            gain *= 2.0;
        }

        sum as f32
    }
}

/// Returns the same value everywhere. Useful for flat worlds and tests.
#[derive(Clone, Copy, Debug)]
pub struct ConstantNoise(pub f32);

impl NoiseSource for ConstantNoise {
    fn fractal_noise_2d(&self, _x: f32, _z: f32, _octaves: u32, _frequency: f32, _persistence: f32) -> f32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test]
    fn test_same_seed_same_values() {
        let a = PerlinNoise::new(7);
        let b = PerlinNoise::new(7);
        for i in 0..64 {
            let x = i as f32 * 3.7;
            let z = i as f32 * -1.3;
            assert_eq!(
                a.fractal_noise_2d(x, z, 6, 12.0, 0.8).to_bits(),
                b.fractal_noise_2d(x, z, 6, 12.0, 0.8).to_bits()
            );
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = PerlinNoise::new(0);
        let b = PerlinNoise::new(1);
        let differs = (0..64).any(|i| {
            let x = i as f32 * 0.37 + 0.11;
            a.fractal_noise_2d(x, x * 0.5, 4, 1.0, 1.0) != b.fractal_noise_2d(x, x * 0.5, 4, 1.0, 1.0)
        });
        assert!(differs, "Different seeds should produce different noise");
    }

    #[test]
    fn test_zero_octaves_is_zero() {
        let noise = PerlinNoise::new(3);
        assert_eq!(noise.fractal_noise_2d(12.5, -4.25, 0, 10.0, 0.8), 0.0);
    }

    #[test]
    fn test_persistence_bounds_output() {
        // octave weights are persistence / 2^i and sum to under 2 * persistence
        let noise = PerlinNoise::new(11);
        for i in 0..256 {
            let v = noise.fractal_noise_2d(i as f32 * 0.77, i as f32 * 1.31, 6, 3.0, 0.1);
            assert!(v.abs() <= 0.4, "{} out of range", v);
        }
    }

    #[test]
    fn test_seed_is_kept() {
        assert_eq!(PerlinNoise::new(7).seed(), 7);
    }

    // Pinned output of noise 0.9 Perlin. A change here means every saved world
    // built from the same seed will come out different.
    #[test_case(0, 0.75, 1.25, 0xbf54ad47 ; "seed 0")]
    #[test_case(1, 3.5, -2.25, 0x3f2247f0 ; "seed 1")]
    #[test_case(42, -7.125, 10.5, 0xbf43e9ab ; "seed 42")]
    fn test_fractal_values_are_stable(seed: u32, x: f32, z: f32, bits: u32) {
        let noise = PerlinNoise::new(seed);
        assert_eq!(noise.fractal_noise_2d(x, z, 6, 1.0, 1.0).to_bits(), bits);
    }

    #[test]
    fn test_constant_noise() {
        let noise = ConstantNoise(0.5);
        assert_relative_eq!(noise.fractal_noise_2d(1.0, 2.0, 6, 800.0, 0.8), 0.5);
    }
}
