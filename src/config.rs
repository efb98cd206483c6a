use arrayvec::ArrayVec;
use thiserror::Error;

pub const NUM_ELEMENTS: usize = 10_000_000;
pub const MIN_READS: usize = 1 << 16;
pub const MAX_READS: usize = 100_000_000;

// Doubling a usize cannot produce more trials than this.
pub const MAX_TRIALS: usize = usize::BITS as usize;

pub type TrialSizes = ArrayVec<usize, MAX_TRIALS>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("lookup table must hold at least one element")]
    NoElements,
    #[error("lookup table of {0} elements exceeds the u32 key space")]
    TooManyElements(usize),
    #[error("trial schedule must start at one or more reads")]
    ZeroMinReads,
    #[error("empty trial schedule: min_reads {min} >= max_reads {max}")]
    EmptySchedule { min: usize, max: usize },
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ParallelMode {
    #[default]
    Reduced,
    // Unsynchronized load/add/store per lookup; updates can be lost.
    Racy,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BenchConfig {
    pub num_elements: usize,
    pub min_reads: usize,
    pub max_reads: usize,
    pub parallel_mode: ParallelMode,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            num_elements: NUM_ELEMENTS,
            min_reads: MIN_READS,
            max_reads: MAX_READS,
            parallel_mode: ParallelMode::default(),
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_elements == 0 {
            return Err(ConfigError::NoElements);
        }
        if u32::try_from(self.num_elements).is_err() {
            return Err(ConfigError::TooManyElements(self.num_elements));
        }
        if self.min_reads == 0 {
            return Err(ConfigError::ZeroMinReads);
        }
        if self.min_reads >= self.max_reads {
            return Err(ConfigError::EmptySchedule {
                min: self.min_reads,
                max: self.max_reads,
            });
        }
        Ok(())
    }

    pub fn trial_sizes(&self) -> TrialSizes {
        let mut sizes = TrialSizes::new();
        if self.min_reads == 0 {
            return sizes;
        }
        let mut n = self.min_reads;
        while n < self.max_reads {
            sizes.push(n);
            match n.checked_mul(2) {
                Some(next) => n = next,
                None => break,
            }
        }
        sizes
    }
}
