//! Deterministic noise fields: integer hashing, Perlin gradient noise and
//! Worley (cellular) noise. Same inputs and seed always give the same output.

use crate::math::scalar::lerp;
use crate::math::{Vector2f, Vector3f};

/// Integer avalanche hash (lowbias32).
#[inline]
pub fn hash_u32(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

#[inline]
fn unit_float(h: u32) -> f32 {
    // top 24 bits map exactly onto [0, 1)
    (h >> 8) as f32 / (1u32 << 24) as f32
}

/// Hash of a lattice cell to `[0, 1)`.
pub fn hash2(x: i32, y: i32, seed: u32) -> f32 {
    let h = hash_u32(x as u32 ^ hash_u32(y as u32 ^ hash_u32(seed)));
    unit_float(h)
}

/// Hash of a lattice cell to `[0, 1)`.
pub fn hash3(x: i32, y: i32, z: i32, seed: u32) -> f32 {
    let h = hash_u32(x as u32 ^ hash_u32(y as u32 ^ hash_u32(z as u32 ^ hash_u32(seed))));
    unit_float(h)
}

#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Classic improved Perlin noise over a seeded permutation table.
#[derive(Clone, Debug)]
pub struct Perlin {
    perm: [u8; 512],
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Perlin {
    pub fn new(seed: u32) -> Self {
        let mut table: [u8; 256] = std::array::from_fn(|i| i as u8);
        // Fisher-Yates driven by the hash chain
        let mut state = hash_u32(seed.wrapping_add(0x9e37_79b9));
        for i in (1..256usize).rev() {
            state = hash_u32(state);
            let j = (state % (i as u32 + 1)) as usize;
            table.swap(i, j);
        }

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    #[inline]
    fn p(&self, i: usize) -> usize {
        self.perm[i & 511] as usize
    }

    fn grad2(hash: usize, x: f32, y: f32) -> f32 {
        match hash & 7 {
            0 => x + y,
            1 => -x + y,
            2 => x - y,
            3 => -x - y,
            4 => x,
            5 => -x,
            6 => y,
            _ => -y,
        }
    }

    fn grad3(hash: usize, x: f32, y: f32, z: f32) -> f32 {
        let h = hash & 15;
        let u = if h < 8 { x } else { y };
        let v = if h < 4 {
            y
        } else if h == 12 || h == 14 {
            x
        } else {
            z
        };
        (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
    }

    /// 2D noise, zero on integer lattice points, roughly in `[-1, 1]`.
    pub fn noise2(&self, p: Vector2f) -> f32 {
        let xf = p.x.floor();
        let yf = p.y.floor();
        let xi = (xf as i32 & 255) as usize;
        let yi = (yf as i32 & 255) as usize;
        let x = p.x - xf;
        let y = p.y - yf;
        let u = fade(x);
        let v = fade(y);

        let aa = self.p(self.p(xi) + yi);
        let ab = self.p(self.p(xi) + yi + 1);
        let ba = self.p(self.p(xi + 1) + yi);
        let bb = self.p(self.p(xi + 1) + yi + 1);

        let x1 = lerp(Self::grad2(aa, x, y), Self::grad2(ba, x - 1.0, y), u);
        let x2 = lerp(Self::grad2(ab, x, y - 1.0), Self::grad2(bb, x - 1.0, y - 1.0), u);
        lerp(x1, x2, v) * std::f32::consts::FRAC_1_SQRT_2
    }

    /// 3D noise, zero on integer lattice points, roughly in `[-1, 1]`.
    pub fn noise3(&self, p: Vector3f) -> f32 {
        let xf = p.x.floor();
        let yf = p.y.floor();
        let zf = p.z.floor();
        let xi = (xf as i32 & 255) as usize;
        let yi = (yf as i32 & 255) as usize;
        let zi = (zf as i32 & 255) as usize;
        let x = p.x - xf;
        let y = p.y - yf;
        let z = p.z - zf;
        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let a = self.p(xi) + yi;
        let aa = self.p(a) + zi;
        let ab = self.p(a + 1) + zi;
        let b = self.p(xi + 1) + yi;
        let ba = self.p(b) + zi;
        let bb = self.p(b + 1) + zi;

        lerp(
            lerp(
                lerp(
                    Self::grad3(self.p(aa), x, y, z),
                    Self::grad3(self.p(ba), x - 1.0, y, z),
                    u,
                ),
                lerp(
                    Self::grad3(self.p(ab), x, y - 1.0, z),
                    Self::grad3(self.p(bb), x - 1.0, y - 1.0, z),
                    u,
                ),
                v,
            ),
            lerp(
                lerp(
                    Self::grad3(self.p(aa + 1), x, y, z - 1.0),
                    Self::grad3(self.p(ba + 1), x - 1.0, y, z - 1.0),
                    u,
                ),
                lerp(
                    Self::grad3(self.p(ab + 1), x, y - 1.0, z - 1.0),
                    Self::grad3(self.p(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                    u,
                ),
                v,
            ),
            w,
        )
    }

    /// Fractal sum of `octaves` layers (lacunarity 2, gain 0.5), normalized by the total amplitude.
    pub fn fbm2(&self, p: Vector2f, octaves: u32) -> f32 {
        let mut sum = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total = 0.0;
        for _ in 0..octaves {
            sum += self.noise2(p * frequency) * amplitude;
            total += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        if total > 0.0 { sum / total } else { 0.0 }
    }
}

/// Distance from `p` to the nearest feature point, one hashed point per unit cell.
pub fn worley2(p: Vector2f, seed: u32) -> f32 {
    let cx = p.x.floor() as i32;
    let cy = p.y.floor() as i32;
    let mut best = f32::INFINITY;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let (x, y) = (cx + dx, cy + dy);
            let feature = Vector2f::new(
                x as f32 + hash2(x, y, seed),
                y as f32 + hash2(x, y, seed ^ 0x5bd1_e995),
            );
            best = best.min(feature.distance(p));
        }
    }
    best
}

pub fn worley3(p: Vector3f, seed: u32) -> f32 {
    let cx = p.x.floor() as i32;
    let cy = p.y.floor() as i32;
    let cz = p.z.floor() as i32;
    let mut best = f32::INFINITY;
    for dz in -1..=1 {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (x, y, z) = (cx + dx, cy + dy, cz + dz);
                let feature = Vector3f::new(
                    x as f32 + hash3(x, y, z, seed),
                    y as f32 + hash3(x, y, z, seed ^ 0x5bd1_e995),
                    z as f32 + hash3(x, y, z, seed ^ 0x1b87_3593),
                );
                best = best.min(feature.distance(p));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_deterministic_and_in_range() {
        assert_eq!(hash_u32(42), hash_u32(42));
        assert_ne!(hash_u32(1), hash_u32(2));
        for i in -20..20 {
            let h = hash2(i, i * 7, 3);
            assert!((0.0..1.0).contains(&h));
            assert_eq!(h, hash2(i, i * 7, 3));
            assert!((0.0..1.0).contains(&hash3(i, -i, 5, 9)));
        }
        assert_ne!(hash2(1, 2, 0), hash2(2, 1, 0));
    }

    #[test]
    fn perlin_is_zero_on_lattice() {
        let perlin = Perlin::new(7);
        for x in -3..3 {
            for y in -3..3 {
                let p = Vector2f::new(x as f32, y as f32);
                assert_eq!(perlin.noise2(p), 0.0);
                assert_eq!(perlin.noise3(Vector3f::new(p.x, p.y, 2.0)), 0.0);
            }
        }
    }

    #[test]
    fn perlin_is_bounded_and_seeded() {
        let a = Perlin::new(1);
        let b = Perlin::new(1);
        let c = Perlin::new(2);
        let mut differs = false;
        for i in 0..200 {
            let p = Vector2f::new(i as f32 * 0.37, i as f32 * 0.11 - 3.0);
            let n = a.noise2(p);
            assert!((-1.0..=1.0).contains(&n));
            assert_eq!(n, b.noise2(p));
            differs |= n != c.noise2(p);

            let q = Vector3f::new(p.x, p.y, i as f32 * 0.05);
            assert!((-1.5..=1.5).contains(&a.noise3(q)));
        }
        assert!(differs);
    }

    #[test]
    fn fbm_is_normalized() {
        let perlin = Perlin::default();
        for i in 0..50 {
            let v = perlin.fbm2(Vector2f::new(i as f32 * 0.13, 0.7), 4);
            assert!((-1.0..=1.0).contains(&v));
        }
        assert_eq!(perlin.fbm2(Vector2f::new(0.3, 0.3), 0), 0.0);
    }

    #[test]
    fn worley_distances() {
        for i in 0..50 {
            let p = Vector2f::new(i as f32 * 0.29, i as f32 * -0.17);
            let d = worley2(p, 11);
            // a feature point lives in the same cell, at most a cell diagonal away
            assert!(d >= 0.0 && d <= 2f32.sqrt());
            assert_eq!(d, worley2(p, 11));

            let d3 = worley3(Vector3f::new(p.x, p.y, 0.5), 11);
            assert!(d3 >= 0.0 && d3 <= 3f32.sqrt());
        }
    }
}
