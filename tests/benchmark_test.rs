use lookup_bench::benchmark::{
    chunk_count, index_chunk, parallel_lookups, sequential_lookups, CHUNK_READS,
};
use lookup_bench::report;
use lookup_bench::table::key_for;
use lookup_bench::{
    execute, Accumulator, BenchConfig, Benchmark, LookupTable, ParallelMode, Phase,
};

fn small_config(num_elements: usize) -> BenchConfig {
    BenchConfig {
        num_elements,
        min_reads: 1,
        max_reads: 2,
        parallel_mode: ParallelMode::Reduced,
    }
}

fn lines(out: &[u8]) -> Vec<String> {
    String::from_utf8(out.to_vec())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_five_element_sequential_trial() {
    let mut bench = Benchmark::new(small_config(5)).unwrap();
    let mut out = Vec::new();

    let trial = bench.run_trial(Phase::Sequential, 5, &mut out).unwrap();

    assert!(!bench.table().is_empty());
    assert_eq!(bench.table().len(), 5);
    assert_eq!(bench.table().num_elements(), 5);
    assert_eq!(bench.config().num_elements, 5);
    // keys 0, 2, 4, 1, 3
    assert_eq!(bench.accumulator(), 15.0);
    assert_eq!(trial.num_reads, 5);
    let line = &lines(&out)[0];
    assert!(line.starts_with("          5 : "), "{:?}", line);
    assert!(line.ends_with("lu/s"), "{:?}", line);
}

#[test]
fn test_five_element_parallel_trial_both_modes() {
    for mode in [ParallelMode::Reduced, ParallelMode::Racy] {
        let table = LookupTable::build(5);
        let mut acc = Accumulator::new();
        parallel_lookups(&table, &mut acc, 5, mode);
        // Racy may drop updates, but never invents them.
        if mode == ParallelMode::Reduced {
            assert_eq!(acc.value(), 15.0);
        } else {
            assert!(acc.value() > 0.0 && acc.value() <= 15.0, "{}", acc.value());
        }
    }
}

#[test]
fn test_sequential_performs_exactly_num_reads_lookups() {
    // Single-element table: every lookup reads 1.0, so the sum counts lookups.
    let table = LookupTable::build(1);
    let mut acc = Accumulator::new();
    sequential_lookups(&table, &mut acc, 12_345);
    assert_eq!(acc.value(), 12_345.0);
}

#[test]
fn test_keys_stay_in_table() {
    for n in [1u32, 5, 997, 10_000_000] {
        for i in (0..100_000_000usize).step_by(99_991) {
            assert!(key_for(i, n) < n);
        }
    }
    let table = LookupTable::build(997);
    for i in 0..10_000 {
        assert_eq!(table.lookup_at(i), table.key_for(i) as f32 + 1.0);
    }
}

#[test]
fn test_sequential_sum_is_deterministic() {
    let mut bench = Benchmark::new(small_config(1000)).unwrap();
    let mut out = Vec::new();

    bench.run_trial(Phase::Sequential, 4096, &mut out).unwrap();
    let first = bench.accumulator();
    bench.reset_accumulator();
    bench.run_trial(Phase::Sequential, 4096, &mut out).unwrap();

    assert_eq!(first, bench.accumulator());
    assert!(first > 0.0);
}

#[test]
fn test_zero_reads_trial() {
    let mut bench = Benchmark::new(small_config(10)).unwrap();
    let mut out = Vec::new();

    for phase in [Phase::Sequential, Phase::Parallel] {
        let trial = bench.run_trial(phase, 0, &mut out).unwrap();
        assert_eq!(trial.num_reads, 0);
        assert!(trial.throughput().map_or(true, |t| t == 0.0));
    }
    assert_eq!(bench.accumulator(), 0.0);
    assert_eq!(lines(&out).len(), 2);
}

#[test]
fn test_reduced_parallel_matches_lookup_count() {
    let table = LookupTable::build(1);
    let mut acc = Accumulator::new();
    parallel_lookups(&table, &mut acc, 10_000, ParallelMode::Reduced);
    assert_eq!(acc.value(), 10_000.0);
}

#[test]
fn test_racy_parallel_never_overcounts() {
    let table = LookupTable::build(1);
    let mut acc = Accumulator::new();
    parallel_lookups(&table, &mut acc, 10_000, ParallelMode::Racy);
    assert!(acc.value() >= 1.0 && acc.value() <= 10_000.0, "{}", acc.value());
}

#[test]
fn test_parallel_trials_leave_cycles_to_the_estimate() {
    let mut bench = Benchmark::new(small_config(100)).unwrap();
    let mut out = Vec::new();

    for reads in [0, 1, 10_000, 3 * CHUNK_READS + 7] {
        let trial = bench.run_trial(Phase::Parallel, reads, &mut out).unwrap();
        assert_eq!(trial.cycles, None, "{} reads", reads);
    }
}

#[test]
fn test_index_chunks_cover_reads_once() {
    for n in [0, 1, CHUNK_READS - 1, CHUNK_READS, CHUNK_READS + 1, 10 * CHUNK_READS + 3] {
        let indices: Vec<usize> = (0..chunk_count(n))
            .flat_map(|c| index_chunk(c, n))
            .collect();
        assert_eq!(indices, (0..n).collect::<Vec<_>>(), "{} reads", n);
    }
}

#[test]
fn test_reduced_parallel_spanning_many_chunks() {
    let table = LookupTable::build(1);
    let mut acc = Accumulator::new();
    let reads = 5 * CHUNK_READS + 11;
    parallel_lookups(&table, &mut acc, reads, ParallelMode::Reduced);
    assert_eq!(acc.value(), reads as f32);
}

#[test]
fn test_run_output_layout() {
    let config = BenchConfig {
        num_elements: 1000,
        min_reads: 16,
        max_reads: 100,
        parallel_mode: ParallelMode::Reduced,
    };
    let mut bench = Benchmark::new(config).unwrap();
    let mut out = Vec::new();

    let summary = bench.run(&mut out).unwrap();
    let lines = lines(&out);

    assert_eq!(summary.sequential.len(), 3);
    assert_eq!(summary.parallel.len(), 3);
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], report::sequential_banner(LookupTable::LABEL));
    assert_eq!(lines[4], report::parallel_banner(LookupTable::LABEL));
    for (line, reads) in lines[1..4].iter().zip([16, 32, 64]) {
        assert!(line.starts_with(&report::trial_prefix(reads)), "{:?}", line);
    }
    assert_eq!(summary.accumulator, bench.accumulator());
    assert!(summary.parallel.iter().all(|t| t.cycles.is_none()));
}

#[test]
fn test_execute_prints_magic_line_when_sum_is_42() {
    // One element worth 1.0; trials of 3, 6 and 12 reads per phase.
    let config = BenchConfig {
        num_elements: 1,
        min_reads: 3,
        max_reads: 13,
        parallel_mode: ParallelMode::Reduced,
    };
    let mut out = Vec::new();

    let summary = execute(config, &mut out).unwrap();
    let lines = lines(&out);

    assert_eq!(summary.accumulator, 42.0);
    assert_eq!(lines.first().map(String::as_str), Some(report::START_BANNER));
    assert_eq!(lines[lines.len() - 2], report::MAGIC_LINE);
    assert_eq!(lines.last().map(String::as_str), Some(report::END_BANNER));
}

#[test]
fn test_execute_rejects_bad_config() {
    let config = BenchConfig {
        num_elements: 0,
        ..BenchConfig::default()
    };
    let mut out = Vec::new();
    assert!(execute(config, &mut out).is_err());
    assert_eq!(lines(&out), vec![report::START_BANNER.to_string()]);
}

#[test]
#[ignore] // Run with cargo test --release -- --ignored
fn benchmark_performance() {
    let stdout = std::io::stdout();
    let summary = execute(BenchConfig::default(), &mut stdout.lock()).unwrap();
    assert_eq!(summary.sequential.len(), 11);
    assert_eq!(summary.parallel.len(), 11);
}
