use std::sync::atomic::{AtomicU32, Ordering};

// Running f32 sum shared by every trial. Stored as raw bits so the racy
// parallel path can be written without a lock and without UB.
#[derive(Debug, Default)]
pub struct Accumulator {
    bits: AtomicU32,
}

impl Accumulator {
    pub fn new() -> Self {
        Accumulator {
            bits: AtomicU32::new(0.0f32.to_bits()),
        }
    }

    pub fn value(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub fn reset(&mut self) {
        *self.bits.get_mut() = 0.0f32.to_bits();
    }

    /// Exclusive add, used by the sequential phase and by the final merge of
    /// a reduced parallel trial.
    #[inline]
    pub fn add(&mut self, v: f32) {
        let bits = self.bits.get_mut();
        *bits = (f32::from_bits(*bits) + v).to_bits();
    }

    /// Load, add, store with no exclusion between the two halves.
    /// Concurrent callers may overwrite each other's updates.
    #[inline]
    pub fn add_unsynchronized(&self, v: f32) {
        let cur = f32::from_bits(self.bits.load(Ordering::Relaxed));
        self.bits.store((cur + v).to_bits(), Ordering::Relaxed);
    }
}
