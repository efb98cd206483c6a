use std::collections::HashMap;
use std::time::Instant;

pub const KEY_STRIDE: u64 = 17;

/// Read-only `u32 -> f32` table holding `key + 1` for every key in
/// `0..num_elements`.
pub struct LookupTable {
    map: HashMap<u32, f32>,
    num_elements: u32,
}

impl LookupTable {
    pub const LABEL: &'static str = "std::collections::HashMap<u32, f32>";

    pub fn build(num_elements: u32) -> Self {
        let start = Instant::now();
        let mut map = HashMap::with_capacity(num_elements as usize);
        for key in 0..num_elements {
            map.insert(key, key as f32 + 1.0);
        }
        tracing::info!(
            num_elements,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "lookup table built"
        );
        LookupTable { map, num_elements }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn num_elements(&self) -> u32 {
        self.num_elements
    }

    pub fn label(&self) -> &'static str {
        Self::LABEL
    }

    // A missing key reads as 0.0, like a default-inserting index would.
    #[inline]
    pub fn get(&self, key: u32) -> f32 {
        self.map.get(&key).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn key_for(&self, i: usize) -> u32 {
        key_for(i, self.num_elements)
    }

    #[inline]
    pub fn lookup_at(&self, i: usize) -> f32 {
        self.get(self.key_for(i))
    }
}

/// Key touched by lookup number `i`: `(i * 17) mod num_elements`.
#[inline]
pub fn key_for(i: usize, num_elements: u32) -> u32 {
    ((i as u64).wrapping_mul(KEY_STRIDE) % num_elements as u64) as u32
}
