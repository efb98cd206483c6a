use crate::accumulator::Accumulator;
use crate::config::{BenchConfig, ConfigError, ParallelMode, MAX_TRIALS};
use crate::perf_counter::{cycles_per_lookup, CycleCounter, CPU_FREQ_GHZ};
use crate::range::Range;
use crate::report::{self, TrialReport};
use crate::table::LookupTable;
use crate::trial::measure_and_report;
use arrayvec::ArrayVec;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    Sequential,
    Parallel,
}

pub type TrialReports = ArrayVec<TrialReport, MAX_TRIALS>;

#[derive(Clone, Debug)]
pub struct BenchSummary {
    pub sequential: TrialReports,
    pub parallel: TrialReports,
    pub accumulator: f32,
}

/// Lookups `0..num_reads` on the calling thread, in order.
pub fn sequential_lookups(table: &LookupTable, acc: &mut Accumulator, num_reads: usize) {
    for i in 0..num_reads {
        acc.add(table.lookup_at(i));
    }
}

// Indices handed to one rayon task at a time.
pub const CHUNK_READS: usize = 1 << 12;

pub fn chunk_count(num_reads: usize) -> usize {
    num_reads.div_ceil(CHUNK_READS)
}

pub fn index_chunk(chunk: usize, num_reads: usize) -> Range<usize> {
    let start = chunk * CHUNK_READS;
    Range::new(start, (start + CHUNK_READS).min(num_reads))
}

/// Lookups `0..num_reads` spread over the rayon pool with no ordering.
pub fn parallel_lookups(
    table: &LookupTable,
    acc: &mut Accumulator,
    num_reads: usize,
    mode: ParallelMode,
) {
    let chunks = (0..chunk_count(num_reads))
        .into_par_iter()
        .map(|c| index_chunk(c, num_reads));
    match mode {
        ParallelMode::Reduced => {
            let partial: f32 = chunks
                .map(|r| r.iter().map(|i| table.lookup_at(i)).sum::<f32>())
                .sum();
            acc.add(partial);
        }
        ParallelMode::Racy => {
            let shared: &Accumulator = acc;
            chunks.for_each(|r| {
                for i in r {
                    shared.add_unsynchronized(table.lookup_at(i));
                }
            });
        }
    }
}

pub struct Benchmark {
    config: BenchConfig,
    table: LookupTable,
    accumulator: Accumulator,
    cycle_counter: CycleCounter,
}

impl Benchmark {
    pub fn new(config: BenchConfig) -> Result<Self, BenchError> {
        config.validate()?;
        // validate() guarantees the element count fits in u32
        let table = LookupTable::build(config.num_elements as u32);
        let cycle_counter = CycleCounter::new();
        tracing::info!(
            cycle_counter = cycle_counter.is_valid(),
            cpu_freq_ghz = *CPU_FREQ_GHZ,
            "benchmark ready"
        );

        Ok(Benchmark {
            config,
            table,
            accumulator: Accumulator::new(),
            cycle_counter,
        })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn table(&self) -> &LookupTable {
        &self.table
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator.value()
    }

    pub fn reset_accumulator(&mut self) {
        self.accumulator.reset();
    }

    /// One timed trial. The trial line is written to `out` in two halves so
    /// the read count is visible while the workload runs.
    pub fn run_trial<W: Write>(
        &mut self,
        phase: Phase,
        num_reads: usize,
        out: &mut W,
    ) -> Result<TrialReport, BenchError> {
        let mode = self.config.parallel_mode;
        let table = &self.table;
        let acc = &mut self.accumulator;
        let counter = &mut self.cycle_counter;
        let mut cycles = None;
        let mut prefix = Ok(());

        let elapsed_ms = measure_and_report(
            || {
                prefix = write!(out, "{}", report::trial_prefix(num_reads))
                    .and_then(|_| out.flush());
            },
            || match phase {
                Phase::Sequential => {
                    counter.start();
                    sequential_lookups(table, acc, num_reads);
                    cycles = counter.stop();
                }
                // The counter only sees the calling thread, which sits idle
                // while the pool works; leave cycles to the time estimate.
                Phase::Parallel => parallel_lookups(table, acc, num_reads, mode),
            },
            |ms| ms,
        );
        prefix?;

        let trial = TrialReport {
            num_reads,
            elapsed_ms,
            cycles,
        };
        writeln!(out, "{}", trial.suffix())?;

        tracing::debug!(
            ?phase,
            num_reads,
            elapsed_ms,
            measured = cycles.is_some(),
            cc_per_lookup = cycles_per_lookup(cycles, elapsed_ms, num_reads),
            "trial finished"
        );
        Ok(trial)
    }

    /// Both phases over the configured schedule, from the label line to the
    /// optional `X=42` line.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<BenchSummary, BenchError> {
        let sizes = self.config.trial_sizes();
        let label = self.table.label();

        tracing::info!(trials = sizes.len(), "sequential phase");
        writeln!(out, "{}", report::sequential_banner(label))?;
        let mut sequential = TrialReports::new();
        for &num_reads in &sizes {
            sequential.push(self.run_trial(Phase::Sequential, num_reads, out)?);
        }

        tracing::info!(
            trials = sizes.len(),
            mode = ?self.config.parallel_mode,
            threads = rayon::current_num_threads(),
            "parallel phase"
        );
        writeln!(out, "{}", report::parallel_banner(label))?;
        let mut parallel = TrialReports::new();
        for &num_reads in &sizes {
            parallel.push(self.run_trial(Phase::Parallel, num_reads, out)?);
        }

        let accumulator = self.accumulator.value();
        if accumulator == 42.0 {
            writeln!(out, "{}", report::MAGIC_LINE)?;
        }

        Ok(BenchSummary {
            sequential,
            parallel,
            accumulator,
        })
    }
}

/// The whole program: banner, table build, both phases, closing banner.
pub fn execute<W: Write>(config: BenchConfig, out: &mut W) -> Result<BenchSummary, BenchError> {
    writeln!(out, "{}", report::START_BANNER)?;
    out.flush()?;

    let mut bench = Benchmark::new(config)?;
    let summary = bench.run(out)?;

    writeln!(out, "{}", report::END_BANNER)?;
    out.flush()?;
    Ok(summary)
}
