use std::time::Instant;

/// Run `setup`, time `workload`, then hand the elapsed whole milliseconds
/// (truncated) to `complete` and return whatever it produces.
///
/// Nothing is caught here: a panic in any of the three closures unwinds
/// straight through to the caller.
pub fn measure_and_report<S, W, C, R>(setup: S, workload: W, complete: C) -> R
where
    S: FnOnce(),
    W: FnOnce(),
    C: FnOnce(u64) -> R,
{
    setup();
    let start = Instant::now();
    workload();
    let elapsed = start.elapsed();
    complete(elapsed.as_millis() as u64)
}
