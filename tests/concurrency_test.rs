/*!
 * Concurrency Tests
 *
 * Sound disciplines must always drain cleanly. The unsynchronized baseline
 * must, given enough trials, be caught corrupting a list.
 */

use listbench::{BenchConfig, BenchError, ExitStatus, Harness, SyncDiscipline, YieldPoints};
use serial_test::serial;

const THREADS: [usize; 3] = [1, 2, 8];
const ITERATIONS: [usize; 2] = [10, 1000];
const LISTS: [usize; 2] = [1, 4];

const RACE_TRIALS: usize = 50;

fn run(config: BenchConfig) -> Result<listbench::RunSummary, BenchError> {
    Harness::new(config)?.run()
}

fn regression_matrix(sync: SyncDiscipline) {
    for lists in LISTS {
        for threads in THREADS {
            for iterations in ITERATIONS {
                let config = BenchConfig::new(threads, iterations)
                    .with_lists(lists)
                    .with_sync(sync)
                    .with_seed((threads * 31 + iterations + lists) as u64);

                match run(config) {
                    Ok(summary) => {
                        assert_eq!(summary.operations, 3 * (threads * iterations) as u64);
                        assert_eq!(summary.wait_avg_ns.is_some(), sync == SyncDiscipline::Mutex);
                    }
                    Err(err) => panic!(
                        "{sync:?} lists={lists} threads={threads} iterations={iterations}: {err}"
                    ),
                }
            }
        }
    }
}

#[test]
#[serial]
fn test_mutex_regression_matrix() {
    regression_matrix(SyncDiscipline::Mutex);
}

#[test]
#[serial]
fn test_spinlock_regression_matrix() {
    regression_matrix(SyncDiscipline::Spinlock);
}

#[test]
#[serial]
fn test_sound_disciplines_survive_every_yield_point() {
    for sync in [SyncDiscipline::Mutex, SyncDiscipline::Spinlock] {
        let config = BenchConfig::new(4, 50)
            .with_lists(2)
            .with_sync(sync)
            .with_yields(YieldPoints::ALL)
            .with_seed(11);
        let summary = run(config).unwrap();
        assert!(summary.label.starts_with("list-idl-"));
    }
}

#[test]
#[serial]
fn test_unsynchronized_baseline_races() {
    // Yield inside the mutating operations only; traversal yields just slow it down
    let race_windows = YieldPoints::parse("id").unwrap();
    let mut caught = None;

    for trial in 0..RACE_TRIALS {
        let config = BenchConfig::new(8, 200)
            .with_sync(SyncDiscipline::None)
            .with_yields(race_windows)
            .with_seed(trial as u64);

        if let Err(err) = run(config) {
            caught = Some((trial, err));
            break;
        }
    }

    let (trial, err) = caught.expect("no race observed without synchronization");
    println!("race caught on trial {trial}: {err}");
    assert!(matches!(
        err.exit_status(),
        ExitStatus::Corruption | ExitStatus::TrappedFault | ExitStatus::NonEmptyShard
    ));
}

#[test]
#[serial]
fn test_single_thread_needs_no_lock() {
    let config = BenchConfig::new(1, 1000)
        .with_lists(4)
        .with_sync(SyncDiscipline::None)
        .with_yields(YieldPoints::ALL)
        .with_seed(5);
    assert!(run(config).is_ok());
}
