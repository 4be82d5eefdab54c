/// Source of uniform samples in [0, 1).
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;
}

/// Small deterministic xorshift generator; seeded, so tests are repeatable.
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        // Zero is a fixed point of xorshift
        Self { state: if seed == 0 { 0x9e37_79b9 } else { seed } }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSource for XorShift32 {
    fn next_f32(&mut self) -> f32 {
        // Top 24 bits keep the result strictly below 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// Browser `Math.random()`.
#[cfg(target_arch = "wasm32")]
pub struct MathRandom;

#[cfg(target_arch = "wasm32")]
impl RandomSource for MathRandom {
    fn next_f32(&mut self) -> f32 {
        js_sys::Math::random() as f32
    }
}
