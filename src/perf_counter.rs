use perf_event::events::Hardware;
use perf_event::{Builder, Counter};

lazy_static::lazy_static! {
    /// Host clock in GHz, probed once.
    pub static ref CPU_FREQ_GHZ: f64 = probe_cpu_frequency_ghz();
}

/// CPU-cycle counter for one trial. Falls back to nothing when the kernel
/// refuses to open the event (containers, perf_event_paranoid, non-Linux).
pub struct CycleCounter {
    counter: Option<Counter>,
}

impl CycleCounter {
    pub fn new() -> Self {
        let counter = Builder::new()
            .kind(Hardware::CPU_CYCLES)
            .build()
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    "cycle counter unavailable, cycles will be estimated from wall time"
                );
                e
            })
            .ok();

        CycleCounter { counter }
    }

    pub fn is_valid(&self) -> bool {
        self.counter.is_some()
    }

    pub fn start(&mut self) {
        if let Some(ref mut counter) = self.counter {
            let _ = counter.reset();
            let _ = counter.enable();
        }
    }

    /// Disable the counter and return the cycles counted since `start`.
    pub fn stop(&mut self) -> Option<u64> {
        let counter = self.counter.as_mut()?;
        let _ = counter.disable();
        match counter.read() {
            Ok(cycles) => Some(cycles),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read cycle counter");
                None
            }
        }
    }
}

impl Default for CycleCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Cycles spent per lookup: measured when available, otherwise wall time
/// multiplied by the probed clock.
pub fn cycles_per_lookup(cycles: Option<u64>, elapsed_ms: u64, num_reads: usize) -> f64 {
    if num_reads == 0 {
        return 0.0;
    }
    let total = match cycles {
        Some(c) => c as f64,
        None => elapsed_ms as f64 * 1e-3 * *CPU_FREQ_GHZ * 1e9,
    };
    total / num_reads as f64
}

fn probe_cpu_frequency_ghz() -> f64 {
    for path in [
        "/sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq",
        "/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_cur_freq",
    ] {
        if let Ok(contents) = std::fs::read_to_string(path) {
            if let Ok(freq_khz) = contents.trim().parse::<f64>() {
                return freq_khz / 1_000_000.0;
            }
        }
    }

    tracing::warn!("could not read CPU frequency, assuming 1.0 GHz");
    1.0
}
