use std::fmt;

pub const START_BANNER: &str = "Start";
pub const END_BANNER: &str = "End";
pub const MAGIC_LINE: &str = "X=42";

pub fn sequential_banner(label: &str) -> String {
    format!(" Measuring lookups from {}", label)
}

pub fn parallel_banner(label: &str) -> String {
    format!(" Measuring parallel lookups from {}", label)
}

// None when the trial finished inside one millisecond.
pub fn throughput(num_reads: usize, elapsed_ms: u64) -> Option<f32> {
    if elapsed_ms == 0 {
        None
    } else {
        Some(num_reads as f32 * 1000.0 / elapsed_ms as f32)
    }
}

pub fn trial_prefix(num_reads: usize) -> String {
    format!(" {:>10} : ", num_reads)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrialReport {
    pub num_reads: usize,
    pub elapsed_ms: u64,
    pub cycles: Option<u64>,
}

impl TrialReport {
    pub fn throughput(&self) -> Option<f32> {
        throughput(self.num_reads, self.elapsed_ms)
    }

    pub fn suffix(&self) -> TrialSuffix {
        TrialSuffix(*self)
    }
}

pub struct TrialSuffix(TrialReport);

impl fmt::Display for TrialSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>10}ms - ", self.0.elapsed_ms)?;
        match self.0.throughput() {
            Some(rate) => write!(f, "{:>10.1}lu/s", rate),
            None => write!(f, "{:>10}lu/s", "n/a"),
        }
    }
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", trial_prefix(self.num_reads), self.suffix())
    }
}
