pub mod accumulator;
pub mod benchmark;
pub mod config;
pub mod perf_counter;
pub mod range;
pub mod report;
pub mod table;
pub mod trial;

// Re-export main types
pub use accumulator::Accumulator;
pub use benchmark::{execute, BenchError, BenchSummary, Benchmark, Phase};
pub use config::{BenchConfig, ConfigError, ParallelMode};
pub use perf_counter::CycleCounter;
pub use range::{Cursor, One, Range};
pub use report::TrialReport;
pub use table::LookupTable;
pub use trial::measure_and_report;
