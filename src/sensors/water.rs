//! Reservoir water-temperature stand-in.
//!
//! The DS18B20 probe is not wired on the current board revision. Until it
//! is, the sampler advances the last value by a small signed perturbation
//! each pass and clamps the result into the physically plausible band for
//! the reservoir. A real probe read can replace [`WaterWalk::advance`]
//! as long as the clamp contract is preserved.

/// Bounded random walk over the reservoir temperature.
pub struct WaterWalk {
    rng: XorShift32,
    min_c: f32,
    max_c: f32,
}

impl WaterWalk {
    pub fn new(seed: u32, min_c: f32, max_c: f32) -> Self {
        Self {
            rng: XorShift32::new(seed),
            min_c,
            max_c,
        }
    }

    /// One perturbation step: ±0.05 °C in 0.01 °C increments, clamped.
    pub fn advance(&mut self, current_c: f32) -> f32 {
        let step = (self.rng.next() % 11) as i32 - 5;
        let next = current_c + step as f32 / 100.0;
        next.clamp(self.min_c, self.max_c)
    }
}

/// Minimal xorshift32 PRNG — more than enough for a cosmetic walk, with
/// no dependency cost. The zero state is a fixed point of xorshift, so
/// the seed is forced non-zero.
struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x6b8b_4567 } else { seed },
        }
    }

    fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}
