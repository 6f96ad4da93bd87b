//! Linear congruential generator used by the crafting draw.

/// LCG multiplier.
const MULTIPLIER: u32 = 0x41A7;

/// LCG increment.
const INCREMENT: u32 = 0x1B23;

/// 2^32 as a float, the divisor for [`CraftRng::next_f64`].
const U32_SPAN: f64 = 4_294_967_296.0;

/// Seeded `state = state * 0x41A7 + 0x1B23 (mod 2^32)` generator.
///
/// The float conversion and index draw are done in `f64` so results match
/// recorded fixtures bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CraftRng {
    state: u32,
}

impl CraftRng {
    /// Creates a generator from a normalized seed.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Advances once and returns the new state.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Advances `steps` times, discarding the outputs.
    pub fn advance(&mut self, steps: usize) {
        for _ in 0..steps {
            self.next_u32();
        }
    }

    /// Advances once and maps the state into `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / U32_SPAN
    }

    /// Draws an index in `0..len` as `floor(next_f64() * len)`.
    ///
    /// Returns `None` without advancing when `len` is 0.
    pub fn next_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = (self.next_f64() * len as f64).floor() as usize;
        Some(index.min(len - 1))
    }
}
